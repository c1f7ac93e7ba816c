//! Combat resolution.
//!
//! Damage is the zombie count minus the player's attack points, floored at
//! zero. Holding a Candle together with Oil or Gasoline burns the horde
//! instead: no damage is taken and both items are spent.

use tracing::info;

use crate::game::Player;

/// Item that lights the fire combos.
pub const CANDLE: &str = "Candle";
/// Fuel for the candle combo.
pub const OIL: &str = "Oil";
/// Fuel for the candle combo, or extra chainsaw uses.
pub const GASOLINE: &str = "Gasoline";
/// The limited-use weapon.
pub const CHAINSAW: &str = "Chainsaw";

/// A pair of items that negates all combat damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCombo {
    /// Candle and Oil.
    CandleOil,
    /// Candle and Gasoline.
    CandleGasoline,
}

impl ItemCombo {
    /// The two items consumed by this combo.
    #[must_use]
    pub const fn items(self) -> [&'static str; 2] {
        match self {
            ItemCombo::CandleOil => [CANDLE, OIL],
            ItemCombo::CandleGasoline => [CANDLE, GASOLINE],
        }
    }

    /// The combo the player can currently perform, Oil preferred.
    #[must_use]
    pub fn available(player: &Player) -> Option<Self> {
        [ItemCombo::CandleOil, ItemCombo::CandleGasoline]
            .into_iter()
            .find(|combo| combo.items().iter().all(|item| player.holds(item)))
    }
}

/// Outcome of one fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatReport {
    /// Zombies fought.
    pub zombies: u32,
    /// Health actually lost.
    pub damage: i32,
    /// Combo used instead of taking damage.
    pub combo: Option<ItemCombo>,
}

/// Raw damage before item combos.
#[must_use]
pub fn raw_damage(zombies: u32, attack: i32) -> i32 {
    let zombies = i32::try_from(zombies).unwrap_or(i32::MAX);
    zombies.saturating_sub(attack).max(0)
}

/// Fight `zombies` and apply the result to the player.
///
/// Damage alone never ends the game; the caller checks health afterwards.
pub fn resolve_combat(player: &mut Player, zombies: u32) -> CombatReport {
    if let Some(combo) = ItemCombo::available(player) {
        for item in combo.items() {
            player.remove_item(item);
        }
        info!(zombies, ?combo, "zombies burned");
        return CombatReport {
            zombies,
            damage: 0,
            combo: Some(combo),
        };
    }

    let damage = raw_damage(zombies, player.attack);
    if damage > 0 {
        player.modify_health(-damage);
    }
    info!(zombies, damage, health = player.health, "combat resolved");
    CombatReport {
        zombies,
        damage,
        combo: None,
    }
}
