//! The four movement directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A direction of travel, also used to index a tile's walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    /// Towards negative x.
    Left = 0,
    /// Towards positive y.
    Up = 1,
    /// Towards positive x.
    Right = 2,
    /// Towards negative y.
    Down = 3,
}

impl Direction {
    /// All directions in wall-index order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Wall index of this direction (0..4).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a wall index, if in range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Direction::Left),
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            3 => Some(Direction::Down),
            _ => None,
        }
    }

    /// The opposite direction. Applying it twice yields `self`.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit offset `(dx, dy)` for one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
        }
    }

    /// Lowercase name, as typed by a player.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for text that names no direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a direction: {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "up" => Ok(Direction::Up),
            "right" => Ok(Direction::Right),
            "down" => Ok(Direction::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
