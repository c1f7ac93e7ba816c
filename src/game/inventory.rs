//! Attack-point bookkeeping for held items.

use crate::game::DevCard;

/// Result of scoring an inventory against the card set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTally {
    /// Base plus the bonus of every recognised item.
    pub attack: i32,
    /// How many held items are the health-restoring item.
    pub health_items: usize,
    /// Held items that no card grants.
    pub unknown: Vec<String>,
}

/// Score `items`: each held item adds the attack points of the first card
/// granting it.
#[must_use]
pub fn tally(items: &[String], cards: &[DevCard], base: i32, health_item: &str) -> AttackTally {
    let mut tally = AttackTally {
        attack: base,
        health_items: 0,
        unknown: Vec::new(),
    };
    for item in items {
        match cards.iter().find(|c| c.item == *item) {
            Some(card) => {
                tally.attack = tally.attack.saturating_add(card.attack_points);
                if card.item.eq_ignore_ascii_case(health_item) {
                    tally.health_items += 1;
                }
            }
            None => tally.unknown.push(item.clone()),
        }
    }
    tally
}
