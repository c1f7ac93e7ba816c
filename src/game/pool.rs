//! Pools of tiles that have not been placed yet.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::ConfigError;
use crate::game::{CONNECTOR_TILE, Environment, START_TILE, Tile};

/// Indoor and outdoor draw piles, plus the reserved connector tile.
///
/// Each draw permanently removes the front tile. The piles are shuffled once,
/// at construction.
#[derive(Debug, Clone)]
pub struct TilePool {
    indoor: VecDeque<Tile>,
    outdoor: VecDeque<Tile>,
    reserved: Option<Tile>,
}

impl TilePool {
    /// Split out the starting tile and the connector, then shuffle both piles.
    ///
    /// Returns the pool together with the starting tile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTile`] if either special tile is absent.
    pub fn build<R: Rng + ?Sized>(
        mut indoor: Vec<Tile>,
        mut outdoor: Vec<Tile>,
        rng: &mut R,
    ) -> Result<(Self, Tile), ConfigError> {
        let start =
            take_named(&mut indoor, START_TILE).ok_or(ConfigError::MissingTile(START_TILE))?;
        let reserved = take_named(&mut outdoor, CONNECTOR_TILE)
            .ok_or(ConfigError::MissingTile(CONNECTOR_TILE))?;

        indoor.shuffle(rng);
        outdoor.shuffle(rng);
        debug!(indoor = indoor.len(), outdoor = outdoor.len(), "tile pools shuffled");

        let pool = Self {
            indoor: indoor.into(),
            outdoor: outdoor.into(),
            reserved: Some(reserved),
        };
        Ok((pool, start))
    }

    /// Draw the next tile of the given environment, or `None` when exhausted.
    pub fn draw(&mut self, environment: Environment) -> Option<Tile> {
        let tile = match environment {
            Environment::Indoor => self.indoor.pop_front(),
            Environment::Outdoor => self.outdoor.pop_front(),
        };
        debug!(%environment, tile = tile.as_ref().map(|t| t.name.as_str()), "tile drawn");
        tile
    }

    /// Put a drawn tile back on top of its pile.
    pub fn return_to_top(&mut self, tile: Tile) {
        match tile.environment {
            Environment::Indoor => self.indoor.push_front(tile),
            Environment::Outdoor => self.outdoor.push_front(tile),
        }
    }

    /// Remaining tiles of the given environment.
    #[must_use]
    pub fn remaining(&self, environment: Environment) -> usize {
        match environment {
            Environment::Indoor => self.indoor.len(),
            Environment::Outdoor => self.outdoor.len(),
        }
    }

    /// The connector tile, if it has not been placed yet.
    #[must_use]
    pub fn reserved(&self) -> Option<&Tile> {
        self.reserved.as_ref()
    }

    /// Take the connector tile for explicit placement.
    pub fn take_reserved(&mut self) -> Option<Tile> {
        self.reserved.take()
    }

    /// Put the connector tile back after a failed placement.
    pub fn restore_reserved(&mut self, tile: Tile) {
        self.reserved = Some(tile);
    }

    /// Every tile still held by the pool, reserved tile included.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.indoor
            .iter()
            .chain(self.outdoor.iter())
            .chain(self.reserved.iter())
    }
}

fn take_named(tiles: &mut Vec<Tile>, name: &str) -> Option<Tile> {
    let index = tiles.iter().position(|t| t.is_named(name))?;
    Some(tiles.remove(index))
}
