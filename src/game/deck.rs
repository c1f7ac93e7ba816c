//! Development cards, the clock, and the cyclic draw order.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// First hour of the night.
pub const FIRST_HOUR: u8 = 9;
/// Last hour in which events happen.
pub const LAST_HOUR: u8 = 11;
/// Cards taken out of rotation at every reshuffle.
pub const DEFAULT_RESHUFFLE_DISCARD: usize = 2;

/// The in-game clock. Advances by one hour each time the deck runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    hour: u8,
}

impl Default for GameClock {
    fn default() -> Self {
        Self { hour: FIRST_HOUR }
    }
}

impl GameClock {
    /// Clock set to a specific hour.
    #[must_use]
    pub const fn at(hour: u8) -> Self {
        Self { hour }
    }

    /// Current hour (9 to 12; 12 means time has run out).
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Move the clock forward one hour.
    pub fn advance(&mut self) {
        self.hour = self.hour.saturating_add(1);
    }

    /// Whether midnight has been reached.
    #[must_use]
    pub const fn is_overrun(self) -> bool {
        self.hour > LAST_HOUR
    }
}

/// An immutable development card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevCard {
    /// Identifier; the draw order holds these.
    pub id: u32,
    /// Events for 9, 10 and 11 o'clock.
    pub events: [String; 3],
    /// Item granted when the card is drawn for an item.
    pub item: String,
    /// Attack bonus of that item.
    pub attack_points: i32,
}

impl DevCard {
    /// The event text for the given hour, if it is 9, 10 or 11.
    #[must_use]
    pub fn event_at(&self, hour: u8) -> Option<&str> {
        let slot = hour.checked_sub(FIRST_HOUR)?;
        self.events.get(usize::from(slot)).map(String::as_str)
    }
}

/// A fixed card set drawn in a shuffled cyclic order.
///
/// When the order runs empty the next draw rebuilds it from every card id,
/// shuffles it, drops `discard` ids from the front and advances the clock.
#[derive(Debug, Clone)]
pub struct DevCardDeck {
    cards: Vec<DevCard>,
    order: VecDeque<u32>,
    discard: usize,
    rng: StdRng,
}

impl DevCardDeck {
    /// Build the deck and perform the opening shuffle (with its discard).
    ///
    /// The opening shuffle does not move the clock.
    #[must_use]
    pub fn new(mut cards: Vec<DevCard>, seed: u64, discard: usize) -> Self {
        cards.sort_by_key(|c| c.id);
        let mut deck = Self {
            cards,
            order: VecDeque::new(),
            discard,
            rng: StdRng::seed_from_u64(seed),
        };
        deck.reshuffle();
        deck
    }

    fn reshuffle(&mut self) {
        let mut ids: Vec<u32> = self.cards.iter().map(|c| c.id).collect();
        ids.shuffle(&mut self.rng);
        let keep = ids.len().saturating_sub(self.discard);
        self.order = ids.into_iter().skip(self.discard).take(keep).collect();
        debug!(order = ?self.order, "deck reshuffled");
    }

    /// Reshuffle and advance the clock if the draw order is empty.
    ///
    /// Returns whether a reshuffle happened.
    pub fn refill_if_empty(&mut self, clock: &mut GameClock) -> bool {
        if !self.order.is_empty() {
            return false;
        }
        self.reshuffle();
        clock.advance();
        info!(hour = clock.hour(), "deck exhausted, time advances");
        true
    }

    /// Draw the next card, reshuffling first if the order is empty.
    ///
    /// Returns `None` only if the deck was built without cards.
    pub fn draw(&mut self, clock: &mut GameClock) -> Option<&DevCard> {
        self.refill_if_empty(clock);
        let id = self.order.pop_front()?;
        debug!(id, remaining = self.order.len(), "card drawn");
        self.card(id)
    }

    /// Burn one card, or reshuffle if none remain (used by cowering).
    pub fn skip(&mut self, clock: &mut GameClock) {
        if self.order.pop_front().is_none() {
            self.refill_if_empty(clock);
        }
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: u32) -> Option<&DevCard> {
        self.cards
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.cards[i])
    }

    /// All cards, sorted by id.
    #[must_use]
    pub fn cards(&self) -> &[DevCard] {
        &self.cards
    }

    /// Ids still to be drawn before the next reshuffle, front first.
    pub fn order(&self) -> impl Iterator<Item = u32> + '_ {
        self.order.iter().copied()
    }

    /// Number of ids still to be drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len()
    }

    /// Cards removed at every reshuffle.
    #[must_use]
    pub const fn discard(&self) -> usize {
        self.discard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn cards(n: u32) -> Vec<DevCard> {
        (1..=n)
            .map(|id| DevCard {
                id,
                events: [
                    format!("nine {id}"),
                    format!("ten {id}"),
                    format!("eleven {id}"),
                ],
                item: format!("Item {id}"),
                attack_points: 1,
            })
            .collect()
    }

    #[test]
    fn test_event_at() {
        let card = &cards(1)[0];
        assert_eq!(card.event_at(9), Some("nine 1"));
        assert_eq!(card.event_at(11), Some("eleven 1"));
        assert_eq!(card.event_at(12), None);
        assert_eq!(card.event_at(8), None);
    }

    #[test]
    fn test_opening_shuffle_discards() {
        let deck = DevCardDeck::new(cards(9), 5, 2);
        assert_eq!(deck.remaining(), 7);
        let ids: BTreeSet<u32> = deck.order().collect();
        assert_eq!(ids.len(), 7);
        assert!(ids.iter().all(|id| (1..=9).contains(id)));
    }

    #[test]
    fn test_exhaustion_advances_clock() {
        let mut deck = DevCardDeck::new(cards(9), 11, 2);
        let mut clock = GameClock::default();
        for _ in 0..7 {
            assert!(deck.draw(&mut clock).is_some());
        }
        assert_eq!(clock.hour(), 9);
        assert_eq!(deck.remaining(), 0);

        assert!(deck.draw(&mut clock).is_some());
        assert_eq!(clock.hour(), 10);
        assert_eq!(deck.remaining(), 6);
    }

    #[test]
    fn test_skip_burns_or_reshuffles() {
        let mut deck = DevCardDeck::new(cards(4), 3, 2);
        let mut clock = GameClock::default();
        deck.skip(&mut clock);
        deck.skip(&mut clock);
        assert_eq!(deck.remaining(), 0);
        assert_eq!(clock.hour(), 9);
        deck.skip(&mut clock);
        assert_eq!(deck.remaining(), 2);
        assert_eq!(clock.hour(), 10);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a: Vec<u32> = DevCardDeck::new(cards(9), 99, 2).order().collect();
        let b: Vec<u32> = DevCardDeck::new(cards(9), 99, 2).order().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_clock_overrun() {
        let mut clock = GameClock::at(11);
        assert!(!clock.is_overrun());
        clock.advance();
        assert!(clock.is_overrun());
        assert_eq!(clock.hour(), 12);
    }
}
