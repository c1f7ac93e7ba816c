//! Error types for loading game data and persisting snapshots.
//!
//! Rejected moves are not errors of this kind: they live in
//! [`crate::game::BlockedMove`] and never end a session.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with tile or card definitions, raised before a session starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid JSON, or a required field is missing.
    #[error("malformed game data: {0}")]
    Json(#[from] serde_json::Error),

    /// A tile group (`inDoor` / `outDoor`) is absent from `tilesCard`.
    #[error("tile group {0:?} is missing")]
    MissingGroup(&'static str),

    /// A tile does not have exactly four wall entries.
    #[error("tile {name:?} has {count} walls, expected 4")]
    WallCount {
        /// Name of the offending tile.
        name: String,
        /// Number of wall entries found.
        count: usize,
    },

    /// A wall entry is neither 0 (open) nor 1 (blocked).
    #[error("tile {name:?} has invalid wall value {value}")]
    WallValue {
        /// Name of the offending tile.
        name: String,
        /// The value found.
        value: u8,
    },

    /// A tile or card has an empty name or item.
    #[error("{kind} {id} has an empty {field}")]
    EmptyField {
        /// "tile" or "card".
        kind: &'static str,
        /// Identifier of the record.
        id: u32,
        /// Name of the empty field.
        field: &'static str,
    },

    /// Two records of the same kind share an id.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// "tile" or "card".
        kind: &'static str,
        /// The repeated id.
        id: u32,
    },

    /// A tile the rules depend on is not in its group.
    #[error("required tile {0:?} not found")]
    MissingTile(&'static str),

    /// A zombie event does not start with a zombie count.
    #[error("card {id} event {event:?} mentions zombies without a leading count")]
    ZombieCount {
        /// Card id.
        id: u32,
        /// The event text.
        event: String,
    },

    /// The deck cannot survive a reshuffle discard.
    #[error("deck has {cards} cards but {discard} are discarded per reshuffle")]
    DeckTooSmall {
        /// Number of cards loaded.
        cards: usize,
        /// Cards removed at each reshuffle.
        discard: usize,
    },
}

/// Failures while writing or reading a session snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem failure.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding failure.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
