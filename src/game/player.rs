//! Player state management.

use crate::game::Position;

/// Inventory size that forces a replacement choice.
pub const INVENTORY_LIMIT: usize = 3;

/// The single player of a session.
///
/// Tiles are referenced by grid position, never held directly; the grid
/// stays the only owner of placed tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Current position.
    pub position: Position,
    /// Position occupied before the last move, if any.
    pub previous: Option<Position>,
    /// Health, never below zero.
    pub health: i32,
    /// Attack points, derived from held items.
    pub attack: i32,
    /// Held items in acquisition order.
    pub items: Vec<String>,
    /// Whether the totem has been found. Never reverts.
    pub has_totem: bool,
    /// Every tile entered by a successful move, in order.
    pub visited: Vec<Position>,
}

impl Player {
    /// Create a player standing on the origin.
    #[must_use]
    pub fn new(health: i32, attack: i32) -> Self {
        Self {
            position: Position::ORIGIN,
            previous: None,
            health: health.max(0),
            attack,
            items: Vec::new(),
            has_totem: false,
            visited: Vec::new(),
        }
    }

    /// Record a successful move onto `to`.
    pub fn advance_to(&mut self, to: Position) {
        self.previous = Some(self.position);
        self.position = to;
        self.visited.push(to);
    }

    /// Jump to an already explored position without recording a visit.
    pub fn retreat_to(&mut self, to: Position) {
        self.previous = Some(self.position);
        self.position = to;
    }

    /// Add `amount` to health, clamping at zero. Returns the new health.
    pub fn modify_health(&mut self, amount: i32) -> i32 {
        self.health = self.health.saturating_add(amount).max(0);
        self.health
    }

    /// Whether health has run out.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Whether an item with this exact name is held.
    #[must_use]
    pub fn holds(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Remove the first item with this name. Returns whether one was removed.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Grant the totem.
    pub fn take_totem(&mut self) {
        self.has_totem = true;
    }
}
