//! Session invariants - sanity checks that detect bugs.
//!
//! These should never trigger between turns of a correctly implemented
//! session. They are used by the property tests and the fuzz targets.

use std::collections::BTreeSet;

use crate::game::{FIRST_HOUR, INVENTORY_LIMIT, Outcome, Session};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// Meant to be called between turns; mid-turn states may legitimately
/// violate the terminal-state checks.
#[must_use]
pub fn check_invariants(session: &Session) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut fail = |message: String| violations.push(InvariantViolation { message });

    let player = session.player();
    let grid = session.grid();

    if player.health < 0 {
        fail(format!("health {} is negative", player.health));
    }
    if player.attack < session.config().base_attack {
        fail(format!(
            "attack {} is below the base {}",
            player.attack,
            session.config().base_attack
        ));
    }
    if player.items.len() >= INVENTORY_LIMIT {
        fail(format!(
            "holding {} items, limit is {}",
            player.items.len(),
            INVENTORY_LIMIT - 1
        ));
    }
    if !grid.contains(player.position) {
        fail(format!("player stands on empty position {}", player.position));
    }
    if let Some(previous) = player.previous
        && !grid.contains(previous)
    {
        fail(format!("previous position {previous} is empty"));
    }
    for position in &player.visited {
        if !grid.contains(*position) {
            fail(format!("visited position {position} is empty"));
        }
    }

    // Every tile exists exactly once: on the grid, in a pool, or reserved.
    let mut ids = BTreeSet::new();
    for (position, tile) in grid.iter() {
        if !ids.insert(tile.id) {
            fail(format!("tile {} at {position} appears twice", tile.id));
        }
    }
    for tile in session.pool().iter() {
        if !ids.insert(tile.id) {
            fail(format!("tile {} is both placed and pooled", tile.id));
        }
    }

    let hour = session.clock().hour();
    if !(FIRST_HOUR..=FIRST_HOUR + 3).contains(&hour) {
        fail(format!("clock reads {hour}:00"));
    }

    let deck = session.deck();
    let mut seen = BTreeSet::new();
    for id in deck.order() {
        if deck.card(id).is_none() {
            fail(format!("draw order holds unknown card {id}"));
        }
        if !seen.insert(id) {
            fail(format!("draw order holds card {id} twice"));
        }
    }
    let cap = deck.cards().len().saturating_sub(deck.discard());
    if deck.remaining() > cap {
        fail(format!("{} cards left to draw, at most {cap}", deck.remaining()));
    }

    match session.outcome() {
        None if player.is_dead() => fail("player is dead but the session goes on".to_string()),
        None if session.clock().is_overrun() => {
            fail("time is up but the session goes on".to_string());
        }
        Some(Outcome::Won) if !player.has_totem => {
            fail("session won without the totem".to_string());
        }
        _ => {}
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::game::{Position, SessionConfig};

    fn session() -> Session {
        Session::new(GameData::builtin().unwrap(), SessionConfig::with_seed(8)).unwrap()
    }

    #[test]
    fn test_new_session_is_clean() {
        assert!(check_invariants(&session()).is_empty());
    }

    #[test]
    fn test_detects_negative_health() {
        let mut s = session();
        s.player_mut().health = -1;
        let violations = check_invariants(&s);
        assert!(violations.iter().any(|v| v.message.contains("negative")));
    }

    #[test]
    fn test_detects_player_off_grid() {
        let mut s = session();
        s.player_mut().position = Position::new(40, 40);
        let violations = check_invariants(&s);
        assert!(violations.iter().any(|v| v.message.contains("empty position")));
    }

    #[test]
    fn test_detects_dead_player_still_playing() {
        let mut s = session();
        s.player_mut().health = 0;
        let violations = check_invariants(&s);
        assert!(violations.iter().any(|v| v.to_string().contains("dead")));
    }
}
