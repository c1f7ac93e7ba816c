//! Sparse grid of placed tiles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Direction, Tile};

/// A grid coordinate. The starting tile sits at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column; grows to the right.
    pub x: i32,
    /// Row; grows upwards.
    pub y: i32,
}

impl Position {
    /// The starting position.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step towards `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Placed tiles keyed by position.
///
/// Append-only: a tile is never removed or replaced once placed. Walls of a
/// placed tile may still be mutated through [`Grid::get_mut`].
#[derive(Debug, Clone, Default)]
pub struct Grid {
    tiles: BTreeMap<Position, Tile>,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A grid holding only `start`, at the origin.
    #[must_use]
    pub fn with_start(start: Tile) -> Self {
        Self {
            tiles: BTreeMap::from([(Position::ORIGIN, start)]),
        }
    }

    /// Place a tile at an empty position.
    ///
    /// # Errors
    ///
    /// Returns the tile back unchanged if the position is already occupied.
    pub fn place(&mut self, position: Position, tile: Tile) -> Result<(), Tile> {
        if self.tiles.contains_key(&position) {
            return Err(tile);
        }
        self.tiles.insert(position, tile);
        Ok(())
    }

    /// Tile at a position.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Mutable tile at a position.
    #[must_use]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    /// Whether a tile has been placed at a position.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Number of placed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placed tiles in position order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> {
        self.tiles.iter().map(|(p, t)| (*p, t))
    }

    /// Position of the first placed tile with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Position> {
        self.iter().find(|(_, t)| t.is_named(name)).map(|(p, _)| p)
    }

    /// Inclusive `(min, max)` corners of the placed area.
    #[must_use]
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut positions = self.tiles.keys();
        let first = *positions.next()?;
        let (min, max) = positions.fold((first, first), |(lo, hi), p| {
            (
                Position::new(lo.x.min(p.x), lo.y.min(p.y)),
                Position::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some((min, max))
    }

    /// ASCII map, one row per y with the highest row first.
    #[must_use]
    pub fn render(&self) -> String {
        let Some((min, max)) = self.bounds() else {
            return String::new();
        };
        let mut out = String::new();
        for y in (min.y..=max.y).rev() {
            for x in min.x..=max.x {
                match self.get(Position::new(x, y)) {
                    Some(tile) => {
                        let name: String = tile.name.chars().take(12).collect();
                        out.push_str(&format!("|{name:12}|"));
                    }
                    None => out.push_str(&" ".repeat(14)),
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Environment;

    fn room(id: u32, name: &str) -> Tile {
        Tile::from_bits(id, name, Environment::Indoor, [0, 0, 0, 0])
    }

    #[test]
    fn test_step() {
        let p = Position::ORIGIN;
        assert_eq!(p.step(Direction::Up), Position::new(0, 1));
        assert_eq!(p.step(Direction::Down), Position::new(0, -1));
        assert_eq!(p.step(Direction::Left), Position::new(-1, 0));
        assert_eq!(p.step(Direction::Right), Position::new(1, 0));
    }

    #[test]
    fn test_place_never_overwrites() {
        let mut grid = Grid::new();
        assert!(grid.place(Position::ORIGIN, room(1, "Foyer")).is_ok());
        let rejected = grid.place(Position::ORIGIN, room(2, "Kitchen"));
        assert_eq!(rejected.map_err(|t| t.id), Err(2));
        assert_eq!(grid.get(Position::ORIGIN).map(|t| t.id), Some(1));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_find_and_bounds() {
        let mut grid = Grid::new();
        grid.place(Position::ORIGIN, room(1, "Foyer")).unwrap();
        grid.place(Position::new(2, -1), room(2, "Kitchen")).unwrap();
        assert_eq!(grid.find("Kitchen"), Some(Position::new(2, -1)));
        assert_eq!(grid.find("Garage"), None);
        assert_eq!(
            grid.bounds(),
            Some((Position::new(0, -1), Position::new(2, 0)))
        );
    }

    #[test]
    fn test_render_rows_top_down() {
        let mut grid = Grid::new();
        grid.place(Position::ORIGIN, room(1, "Foyer")).unwrap();
        grid.place(Position::new(0, 1), room(2, "Kitchen")).unwrap();
        let map = grid.render();
        let lines: Vec<_> = map.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Kitchen"));
        assert!(lines[1].contains("Foyer"));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(-1, 3).to_string(), "(-1, 3)");
    }
}
