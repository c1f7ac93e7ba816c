//! Movement across the grid.
//!
//! A move either enters an already placed tile, which must be rotated so its
//! entry wall is open, or draws a fresh tile from the pool matching the
//! player's current environment. Crossing between Indoor and Outdoor is only
//! legal through the connector tile.

use std::collections::{BTreeSet, VecDeque};

use thiserror::Error;
use tracing::{debug, info};

use crate::game::{
    CONNECTOR_TILE, Direction, Environment, Grid, Player, Position, RESERVING_TILE, Tile,
    TilePool, Wall,
};

/// Why a move was rejected. The turn is not consumed in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockedMove {
    /// No orientation of the target tile opens the entry wall.
    #[error("the way is blocked by a wall")]
    Wall,
    /// The Indoor/Outdoor crossing rule forbids the transition.
    #[error("you cannot cross between indoors and outdoors here")]
    Environment,
    /// The target position is empty and no tile is left to draw.
    #[error("there are no tiles left to explore in that direction")]
    PoolExhausted,
}

/// A completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Where the player came from.
    pub from: Position,
    /// Where the player is now.
    pub to: Position,
    /// Whether the destination tile was drawn by this move.
    pub drew_tile: bool,
}

/// Whether a transition between two tiles respects the crossing rule.
///
/// - Indoor to Outdoor: only into the connector, and only with the totem.
/// - Outdoor to Indoor: only when leaving the connector.
/// - Same environment: always.
#[must_use]
pub fn crossing_permitted(from: &Tile, to: &Tile, has_totem: bool) -> bool {
    match (from.environment, to.environment) {
        (Environment::Indoor, Environment::Outdoor) => to.is_named(CONNECTOR_TILE) && has_totem,
        (Environment::Outdoor, Environment::Indoor) => from.is_named(CONNECTOR_TILE),
        _ => true,
    }
}

/// Move the player one step.
///
/// # Errors
///
/// Returns a [`BlockedMove`] cause and leaves the player where it was.
/// A tile rotated during a failed alignment keeps its last orientation.
pub fn move_player(
    grid: &mut Grid,
    pool: &mut TilePool,
    player: &mut Player,
    direction: Direction,
) -> Result<Step, BlockedMove> {
    let from = player.position;
    let to = from.step(direction);

    // The current tile is always placed; a missing one means a corrupted
    // session, which we report as a wall rather than panicking.
    let Some(current) = grid.get(from).cloned() else {
        return Err(BlockedMove::Wall);
    };

    let drew_tile = if let Some(target) = grid.get_mut(to) {
        enter_placed(&current, target, direction, player.has_totem)?;
        false
    } else {
        let tile = pool
            .draw(current.environment)
            .ok_or(BlockedMove::PoolExhausted)?;
        if !crossing_permitted(&current, &tile, player.has_totem) {
            pool.return_to_top(tile);
            return Err(BlockedMove::Environment);
        }
        if let Err(tile) = grid.place(to, tile) {
            pool.return_to_top(tile);
            return Err(BlockedMove::Wall);
        }
        true
    };

    player.advance_to(to);
    info!(%direction, %from, %to, drew_tile, "moved");
    Ok(Step {
        from,
        to,
        drew_tile,
    })
}

/// Whether the placed region reachable from `start` through open walls has
/// no open wall leading to an empty position.
///
/// Reachability only follows the open walls of the tile being left.
#[must_use]
pub fn is_dead_end(grid: &Grid, start: Position) -> bool {
    let mut queue = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);
    while let Some(position) = queue.pop_front() {
        let Some(tile) = grid.get(position) else {
            continue;
        };
        for side in tile.exits() {
            let next = position.step(side);
            if !grid.contains(next) {
                return false;
            }
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    debug!(%start, explored = seen.len(), "dead end");
    true
}

fn enter_placed(
    current: &Tile,
    target: &mut Tile,
    direction: Direction,
    has_totem: bool,
) -> Result<(), BlockedMove> {
    if !target.align_for_entry(direction) {
        return Err(BlockedMove::Wall);
    }
    if target.is_named(RESERVING_TILE) {
        debug!(tile = %target.name, "reserving up exit");
        target.set_wall(Direction::Up, Wall::Blocked);
    }
    if !crossing_permitted(current, target, has_totem) {
        return Err(BlockedMove::Environment);
    }
    Ok(())
}
