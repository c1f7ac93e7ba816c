//! Seams between the engine and whoever plays it.
//!
//! The engine blocks on a [`DecisionProvider`] whenever the rules need a
//! choice, and reports what happens through a [`DisplaySink`]. Answers are
//! validated by the session, which asks again until one is acceptable.

use std::collections::VecDeque;
use std::fmt;

use crate::game::ItemCombo;

/// A question the engine needs answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Zombies attack: "fight" or "run".
    FightOrRun {
        /// Number of zombies.
        zombies: u32,
    },
    /// Health is low: "cower" or "continue".
    CowerOrContinue,
    /// Draw another card for its item: "y" or "n".
    DrawItem,
    /// Inventory is full: "1" or "2" replaces a held item, "3" drops the new one.
    ReplaceItem {
        /// First held item.
        first: String,
        /// Second held item.
        second: String,
        /// Newly acquired item.
        new: String,
    },
    /// Pour Gasoline into the Chainsaw: "y" or "n".
    FuelChainsaw,
    /// Use a Candle combo in the coming fight: "y" or "n".
    ConfirmCombo(ItemCombo),
    /// Use the only held item: "y" or "n".
    UseItem {
        /// The held item.
        item: String,
    },
    /// Use one of two held items: "1", "2" or "none".
    ChooseItem {
        /// First held item.
        first: String,
        /// Second held item.
        second: String,
    },
    /// Run away: the number of a visited tile.
    RunAwayTo {
        /// Names of visited tiles, numbered from 1.
        tiles: Vec<String>,
    },
    /// Place the connector tile above the Dining Room: "y" or "n".
    PlacePatio,
    /// Bury the totem: "y" or "n".
    BuryTotem,
    /// Dead end reached; break through a wall: "y" or "n".
    ZombieDoor,
    /// Which blocked wall to break, by number (1 left, 2 up, 3 right, 4 down).
    BreakWall,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::FightOrRun { zombies } => {
                write!(f, "{zombies} zombies appear! Do you fight or run?")
            }
            Prompt::CowerOrContinue => {
                f.write_str("You are badly hurt. Cower to recover or continue?")
            }
            Prompt::DrawItem => f.write_str("Draw another card to find an item? (y/n)"),
            Prompt::ReplaceItem { first, second, new } => write!(
                f,
                "You can carry two items. Replace {first} (1), {second} (2), or drop {new} (3)?"
            ),
            Prompt::FuelChainsaw => {
                f.write_str("Pour the Gasoline into the Chainsaw for two more uses? (y/n)")
            }
            Prompt::ConfirmCombo(combo) => {
                let [a, b] = combo.items();
                write!(f, "Burn the zombies with {a} and {b}? (y/n)")
            }
            Prompt::UseItem { item } => write!(f, "Use {item} in this fight? (y/n)"),
            Prompt::ChooseItem { first, second } => {
                write!(f, "Use {first} (1), {second} (2), or none?")
            }
            Prompt::RunAwayTo { tiles } => {
                f.write_str("Run to which tile?")?;
                for (i, name) in tiles.iter().enumerate() {
                    write!(f, "\n  {}: {name}", i + 1)?;
                }
                Ok(())
            }
            Prompt::PlacePatio => f.write_str("Place the Patio above the Dining Room? (y/n)"),
            Prompt::BuryTotem => f.write_str("Bury the totem here? (y/n)"),
            Prompt::ZombieDoor => {
                f.write_str("You are trapped. Let the zombies break through a wall? (y/n)")
            }
            Prompt::BreakWall => {
                f.write_str("Which wall breaks? (1 left, 2 up, 3 right, 4 down)")
            }
        }
    }
}

/// Supplies answers to engine prompts.
pub trait DecisionProvider {
    /// Answer `prompt`. `choices` lists the accepted answers; anything else
    /// makes the engine ask again.
    fn decide(&mut self, prompt: &Prompt, choices: &[String]) -> String;
}

/// Receives player-facing text.
pub trait DisplaySink {
    /// Show one line.
    fn show(&mut self, line: &str);
}

/// Both halves of an interactive frontend.
pub trait Frontend: DecisionProvider + DisplaySink {}

impl<T: DecisionProvider + DisplaySink> Frontend for T {}

/// Replays a fixed list of answers and records everything shown.
///
/// Meant for tests and automated runs. Running out of answers is a bug in
/// the script and panics with the unanswered prompt.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrontend {
    answers: VecDeque<String>,
    /// Every prompt asked, in order.
    pub asked: Vec<Prompt>,
    /// Every line shown, in order.
    pub lines: Vec<String>,
}

impl ScriptedFrontend {
    /// Create a frontend that answers with `answers` in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Answers not consumed yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.answers.len()
    }

    /// Whether any shown line contains `needle`.
    #[must_use]
    pub fn saw(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl DecisionProvider for ScriptedFrontend {
    fn decide(&mut self, prompt: &Prompt, _choices: &[String]) -> String {
        self.asked.push(prompt.clone());
        match self.answers.pop_front() {
            Some(answer) => answer,
            None => panic!("script ran out of answers at prompt: {prompt}"),
        }
    }
}

impl DisplaySink for ScriptedFrontend {
    fn show(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
