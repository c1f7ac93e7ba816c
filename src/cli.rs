//! CLI command implementations for Zimp.

pub(crate) mod map;
pub(crate) mod play;
pub(crate) mod validate;

use std::error::Error;
use std::fmt;
use std::path::Path;

use tracing::info;
use zimp::{ConfigError, GameData, SnapshotError};

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(format!("invalid game data: {e}"))
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the data file at `path`, or the bundled data when absent.
fn load_data(path: Option<&Path>) -> Result<GameData, CliError> {
    let data = match path {
        Some(path) => GameData::from_path(path)?,
        None => GameData::builtin()?,
    };
    info!(tiles = data.tile_count(), cards = data.cards.len(), "game data ready");
    Ok(data)
}

/// The given seed, or a fresh random one.
fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
