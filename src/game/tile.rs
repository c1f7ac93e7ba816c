//! Tiles: identity, environment and rotatable walls.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::Direction;

/// Tile the player starts on at the origin.
pub const START_TILE: &str = "Foyer";
/// The only legal crossing between Indoor and Outdoor regions.
pub const CONNECTOR_TILE: &str = "Patio";
/// Indoor tile whose UP exit is held for the connector.
pub const RESERVING_TILE: &str = "Dining Room";
/// Tile where the totem is found.
pub const TOTEM_TILE: &str = "Evil Temple";
/// Tile where the totem is buried to win.
pub const RITUAL_TILE: &str = "Graveyard";

/// Which region a tile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Inside the house.
    Indoor,
    /// Around the house.
    Outdoor,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Indoor => f.write_str("Indoor"),
            Environment::Outdoor => f.write_str("Outdoor"),
        }
    }
}

/// State of one tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Wall {
    /// An exit.
    Open = 0,
    /// No exit.
    Blocked = 1,
}

impl Wall {
    /// Decode the data-file representation (0 = open, 1 = blocked).
    #[must_use]
    pub const fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Wall::Open),
            1 => Some(Wall::Blocked),
            _ => None,
        }
    }

    /// Encode as 0 / 1.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Recognised tile specials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFeature {
    /// "+1 Health if end turn here."
    HealOnTurnEnd,
    /// "May draw a new card to find an item." (single use)
    ItemSearch,
    /// Any other text, shown but without effect.
    Flavor,
}

const HEAL_SPECIAL: &str = "+1 Health if end turn here.";
const SEARCH_SPECIAL: &str = "May draw a new card to find an item.";

/// A placed or not-yet-placed tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Identifier from the data file.
    pub id: u32,
    /// Name; several rules key on exact names.
    pub name: String,
    /// Region the tile belongs to.
    pub environment: Environment,
    /// Optional special-effect text.
    pub special: Option<String>,
    walls: [Wall; 4],
}

impl Tile {
    /// Create a tile. Walls are indexed by [`Direction::index`].
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        environment: Environment,
        walls: [Wall; 4],
    ) -> Self {
        Self {
            id,
            name: name.into(),
            environment,
            special: None,
            walls,
        }
    }

    /// Build from the 0/1 wall encoding used by tests and data files.
    ///
    /// Any non-zero bit is treated as blocked; the loader rejects bad bits
    /// before reaching this point.
    #[must_use]
    pub fn from_bits(
        id: u32,
        name: impl Into<String>,
        environment: Environment,
        bits: [u8; 4],
    ) -> Self {
        let walls = bits.map(|b| if b == 0 { Wall::Open } else { Wall::Blocked });
        Self::new(id, name, environment, walls)
    }

    /// Attach special-effect text.
    #[must_use]
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    /// Current wall orientation.
    #[must_use]
    pub const fn walls(&self) -> [Wall; 4] {
        self.walls
    }

    /// Wall on the given side.
    #[must_use]
    pub const fn wall(&self, side: Direction) -> Wall {
        self.walls[side.index()]
    }

    /// Overwrite one wall in place (reservation, patio opening, zombie doors).
    pub fn set_wall(&mut self, side: Direction, wall: Wall) {
        self.walls[side.index()] = wall;
    }

    /// Whether the given side is an exit.
    #[must_use]
    pub fn is_open(&self, side: Direction) -> bool {
        self.wall(side) == Wall::Open
    }

    /// Directions with an open wall, in index order.
    pub fn exits(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_open(*d))
    }

    /// Rotate 90°: the wall at index 3 moves to index 0, the rest shift up.
    pub fn rotate(&mut self) {
        self.walls.rotate_right(1);
    }

    /// Rotate until the wall facing an entry from `entry` is open.
    ///
    /// Tries at most four orientations. On failure the tile keeps its last
    /// orientation, which after four turns is the starting one.
    pub fn align_for_entry(&mut self, entry: Direction) -> bool {
        let facing = entry.opposite();
        for turns in 0..4 {
            if self.is_open(facing) {
                debug!(tile = %self.name, turns, "aligned");
                return true;
            }
            self.rotate();
        }
        debug!(tile = %self.name, "no orientation opens the entry wall");
        self.is_open(facing)
    }

    /// Whether this tile carries the given exact name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    /// Classify the special text.
    #[must_use]
    pub fn feature(&self) -> Option<TileFeature> {
        let special = self.special.as_deref()?;
        Some(match special {
            HEAL_SPECIAL => TileFeature::HealOnTurnEnd,
            SEARCH_SPECIAL => TileFeature::ItemSearch,
            _ => TileFeature::Flavor,
        })
    }
}
