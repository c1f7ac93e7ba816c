//! Interactive play on the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};
use zimp::game::{DecisionProvider, DisplaySink, Prompt};
use zimp::{Direction, Session, SessionConfig};

use super::{CliError, load_data, seed_or_random};

/// Reads answers from a line-oriented input and prints to stdout.
///
/// Once the input is closed every prompt takes its first choice, so a
/// session always runs to the end of the current turn.
#[derive(Debug)]
pub(crate) struct TerminalFrontend<R> {
    input: R,
    closed: bool,
}

impl<R: BufRead> TerminalFrontend<R> {
    pub(crate) fn new(input: R) -> Self {
        Self {
            input,
            closed: false,
        }
    }

    /// Next trimmed line, or `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.closed = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

fn prompt_marker(choices: &str) {
    print!("[{choices}] > ");
    if let Err(e) = io::stdout().flush() {
        warn!(error = %e, "stdout flush failed");
    }
}

impl<R: BufRead> DecisionProvider for TerminalFrontend<R> {
    fn decide(&mut self, prompt: &Prompt, choices: &[String]) -> String {
        println!("{prompt}");
        prompt_marker(&choices.join("/"));
        self.read_line()
            .or_else(|| choices.first().cloned())
            .unwrap_or_default()
    }
}

impl<R> DisplaySink for TerminalFrontend<R> {
    fn show(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the game data is invalid.
pub(crate) fn execute(
    seed: Option<u64>,
    data: Option<PathBuf>,
    save: PathBuf,
) -> Result<(), CliError> {
    let seed = seed_or_random(seed);
    let data = load_data(data.as_deref())?;
    let mut session = Session::new(data, SessionConfig::with_seed(seed))?;
    let mut frontend = TerminalFrontend::new(io::stdin().lock());

    println!("Zimp - seed {seed}");
    println!("Find the totem in the Evil Temple and bury it in the Graveyard before midnight.");
    println!("Commands: a direction (left, up, right, down), //status, //save, //quit");
    println!();
    println!("{}", session.status());

    while !session.is_over() {
        let exits = session.exits();
        let names: Vec<&str> = exits.iter().map(|d| d.name()).collect();
        println!("Exits: {}", names.join(", "));
        prompt_marker("direction");

        let Some(line) = frontend.read_line() else {
            info!("input closed, leaving the game");
            break;
        };
        match line.as_str() {
            "//quit" => break,
            "//status" => println!("{}", session.status()),
            "//save" => match session.snapshot().write(&save) {
                Ok(()) => println!("Game saved to {}.", save.display()),
                Err(e) => println!("Could not save: {e}"),
            },
            "" => {}
            other => match other.parse::<Direction>() {
                Ok(direction) if exits.contains(&direction) => {
                    if session.take_turn(direction, &mut frontend).is_ok() && !session.is_over() {
                        println!();
                        println!("{}", session.status());
                    }
                }
                Ok(direction) => println!("There is no exit {direction} from here."),
                Err(e) => {
                    debug!(input = other, "unrecognised command");
                    println!("{e}");
                }
            },
        }
    }

    println!();
    println!("{}", session.status());
    if let Some(outcome) = session.outcome() {
        println!("{outcome}");
    }
    Ok(())
}
