//! Game layer for Zimp.
//!
//! Implements the rules of a single-player exploration game:
//! - Tiles with walls, rotation and an Indoor/Outdoor environment
//! - An append-only grid explored one step at a time
//! - A development deck whose exhaustion drives the clock
//! - Card events: zombie fights, health changes, item draws
//! - The totem hunt and the burial ritual that wins the game

mod combat;
mod deck;
mod direction;
mod events;
mod frontend;
mod grid;
mod invariants;
mod inventory;
mod movement;
mod player;
mod pool;
mod session;
mod snapshot;
mod tile;

pub use combat::{
    CANDLE, CHAINSAW, CombatReport, GASOLINE, ItemCombo, OIL, raw_damage, resolve_combat,
};
pub use deck::{DEFAULT_RESHUFFLE_DISCARD, DevCard, DevCardDeck, FIRST_HOUR, GameClock, LAST_HOUR};
pub use direction::{Direction, ParseDirectionError};
pub use events::{EventKind, classify, zombie_count};
pub use frontend::{DecisionProvider, DisplaySink, Frontend, Prompt, ScriptedFrontend};
pub use grid::{Grid, Position};
pub use invariants::{InvariantViolation, check_invariants};
pub use inventory::{AttackTally, tally};
pub use movement::{BlockedMove, Step, crossing_permitted, is_dead_end, move_player};
pub use player::{INVENTORY_LIMIT, Player};
pub use pool::TilePool;
pub use session::{
    COWER_HEAL, LOW_HEALTH, LossCause, Outcome, RUN_PENALTY, RitualStage, Session, SessionConfig,
    ZOMBIE_DOOR_HORDE,
};
pub use snapshot::{PlayerSnapshot, Snapshot};
pub use tile::{
    CONNECTOR_TILE, Environment, RESERVING_TILE, RITUAL_TILE, START_TILE, TOTEM_TILE, Tile,
    TileFeature, Wall,
};
