//! Non-interactive walk that prints the explored map.

use std::path::PathBuf;

use tracing::info;
use zimp::game::{DecisionProvider, DisplaySink, Prompt, check_invariants};
use zimp::{Direction, Session, SessionConfig};

use super::{CliError, load_data, seed_or_random};

/// Answers every prompt with its first choice and keeps the log.
#[derive(Debug, Default)]
struct AutoPilot {
    log: Vec<String>,
}

impl DecisionProvider for AutoPilot {
    fn decide(&mut self, prompt: &Prompt, choices: &[String]) -> String {
        let answer = choices.first().cloned().unwrap_or_default();
        self.log.push(format!("{prompt} -> {answer}"));
        answer
    }
}

impl DisplaySink for AutoPilot {
    fn show(&mut self, line: &str) {
        self.log.push(line.to_string());
    }
}

/// Execute the map command: walk `moves` in order and print the result.
///
/// Blocked moves are reported and skipped. With `verbose`, every line the
/// game displayed is printed as well.
///
/// # Errors
///
/// Returns an error if the game data is invalid.
pub(crate) fn execute(
    seed: Option<u64>,
    data: Option<PathBuf>,
    moves: Vec<Direction>,
    verbose: bool,
) -> Result<(), CliError> {
    let seed = seed_or_random(seed);
    let data = load_data(data.as_deref())?;
    let mut session = Session::new(data, SessionConfig::with_seed(seed))?;
    let mut pilot = AutoPilot::default();

    for (turn, direction) in moves.into_iter().enumerate() {
        if session.is_over() {
            break;
        }
        if let Err(cause) = session.take_turn(direction, &mut pilot) {
            println!("Move {} ({direction}) blocked: {cause}", turn + 1);
        }
    }

    let violations = check_invariants(&session);
    info!(lines = pilot.log.len(), violations = violations.len(), "walk finished");

    if verbose {
        for line in &pilot.log {
            println!("{line}");
        }
        println!();
    }
    println!("Seed {seed}");
    println!("{}", session.status());
    if let Some(outcome) = session.outcome() {
        println!("{outcome}");
    }
    for violation in &violations {
        println!("{violation}");
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!("{} invariant violations", violations.len())))
    }
}
