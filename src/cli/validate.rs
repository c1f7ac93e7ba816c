//! Game data validation command implementation.

use std::path::PathBuf;

use zimp::GameData;
use zimp::game::{
    CONNECTOR_TILE, EventKind, RESERVING_TILE, RITUAL_TILE, START_TILE, TOTEM_TILE, classify,
};

use super::CliError;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub(crate) fn execute(data: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", data.display());
    println!();

    let loaded = match GameData::from_path(&data) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_check("Load and validate", false);
            return Err(e.into());
        }
    };
    print_check("Load and validate", true);

    for name in [START_TILE, CONNECTOR_TILE] {
        print_check(&format!("Required tile {name}"), true);
    }
    // The game can be played without these, but never won.
    let mut winnable = true;
    for name in [TOTEM_TILE, RESERVING_TILE, RITUAL_TILE] {
        let found = loaded
            .indoor
            .iter()
            .chain(&loaded.outdoor)
            .any(|t| t.is_named(name));
        print_check(&format!("Tile {name}"), found);
        winnable &= found;
    }

    let mut combats = 0;
    let mut health = 0;
    let mut items = 0;
    for event in loaded.cards.iter().flat_map(|c| &c.events) {
        match classify(event) {
            EventKind::Combat { .. } => combats += 1,
            EventKind::HealthDelta(_) => health += 1,
            EventKind::ItemDraw => items += 1,
            EventKind::Generic => {}
        }
    }

    println!();
    println!("Summary:");
    println!("  Indoor tiles:  {}", loaded.indoor.len());
    println!("  Outdoor tiles: {}", loaded.outdoor.len());
    println!("  Cards:         {}", loaded.cards.len());
    println!("  Events:        {combats} combat, {health} health, {items} item");

    println!();
    if winnable {
        println!("Validation successful!");
    } else {
        println!("Validation successful, but the game cannot be won with this data.");
    }
    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
