// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Zimp: a single-player tile-exploration survival game engine.
//!
//! The player starts in the Foyer of a haunted house at 9 o'clock, explores
//! by drawing room tiles, survives the events of a development deck, finds
//! the totem in the Evil Temple and buries it in the Graveyard before
//! midnight.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play / validate / map)       │
//! ├─────────────────────────────────────┤
//! │   Session: turn pipeline, prompts   │
//! ├─────────────────────────────────────┤
//! │   Rules: grid, tiles, deck, combat  │
//! ├─────────────────────────────────────┤
//! │   Data: JSON tile and card loader   │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine never reads input itself. Every choice goes through a
//! [`game::Frontend`], so the same session runs against a terminal or a
//! scripted list of answers.

pub mod data;
pub mod error;
pub mod game;

pub use data::GameData;
pub use error::{ConfigError, SnapshotError};

// Re-export key game types at crate root for convenience
pub use game::{
    BlockedMove, Direction, Frontend, Grid, Outcome, Player, Position, Session, SessionConfig,
    Snapshot, Tile,
};
