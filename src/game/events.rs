//! Classification of card event text.

/// What a card event asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A zombie attack; fight or run.
    Combat {
        /// Number of attacking zombies.
        zombies: u32,
    },
    /// Direct health change.
    HealthDelta(i32),
    /// Offer to draw another card for its item.
    ItemDraw,
    /// Flavor text only.
    Generic,
}

/// Classify event text. Matching is case-insensitive and checked in the order
/// zombies, health, item; anything else is generic.
///
/// A zombie event without a leading count cannot be fought and falls back to
/// [`EventKind::Generic`]; the loader rejects such cards up front.
#[must_use]
pub fn classify(event: &str) -> EventKind {
    let lower = event.to_lowercase();
    if lower.contains("zombies") {
        return zombie_count(event).map_or(EventKind::Generic, |zombies| EventKind::Combat {
            zombies,
        });
    }
    if lower.contains("health") {
        let delta = if event.contains("-1") { -1 } else { 1 };
        return EventKind::HealthDelta(delta);
    }
    if lower.contains("item") {
        return EventKind::ItemDraw;
    }
    EventKind::Generic
}

/// Leading integer token of a zombie event ("4 Zombies" gives 4).
#[must_use]
pub fn zombie_count(event: &str) -> Option<u32> {
    event.split_whitespace().next()?.parse().ok()
}
