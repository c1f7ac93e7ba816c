//! Save-game snapshots.
//!
//! A snapshot is a JSON record of the state a player would want to inspect
//! later: the clock, the draw order, the player and the placed tiles.
//! Snapshots are written for reference and are not used to resume a session.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SnapshotError;
use crate::game::Session;

/// Player portion of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Current health.
    pub health: i32,
    /// Current attack points.
    pub attack_points: i32,
    /// Held items.
    #[serde(rename = "item")]
    pub items: Vec<String>,
    /// Name of the current tile.
    pub current_tile: Option<String>,
    /// Name of the previous tile.
    pub previous_tile: Option<String>,
    /// Grid position as `[x, y]`.
    pub position: [i32; 2],
    /// Whether the totem is held.
    pub has_totem: bool,
}

/// Everything persisted by a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current hour.
    pub time: u8,
    /// Whether the session has ended.
    pub game_over: bool,
    /// Card ids still to be drawn, front first.
    pub id_order: Vec<u32>,
    /// The player.
    pub player: PlayerSnapshot,
    /// Tile names keyed by "(x, y)".
    pub grid: BTreeMap<String, String>,
}

impl Snapshot {
    /// Capture the current state of `session`.
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        let player = session.player();
        Self {
            time: session.clock().hour(),
            game_over: session.is_over(),
            id_order: session.deck().order().collect(),
            player: PlayerSnapshot {
                health: player.health,
                attack_points: player.attack,
                items: player.items.clone(),
                current_tile: session.current_tile().map(|t| t.name.clone()),
                previous_tile: session.previous_tile().map(|t| t.name.clone()),
                position: [player.position.x, player.position.y],
                has_totem: player.has_totem,
            },
            grid: session
                .grid()
                .iter()
                .map(|(position, tile)| (position.to_string(), tile.name.clone()))
                .collect(),
        }
    }

    /// Write as pretty-printed JSON, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] on encoding or filesystem failure.
    pub fn write(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Read a snapshot written by [`Snapshot::write`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] on filesystem or decoding failure.
    pub fn read(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Session {
    /// Capture a [`Snapshot`] of this session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::game::SessionConfig;

    #[test]
    fn test_capture_fresh_session() {
        let session =
            Session::new(GameData::builtin().unwrap(), SessionConfig::with_seed(4)).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.time, 9);
        assert!(!snap.game_over);
        assert_eq!(snap.player.health, 6);
        assert_eq!(snap.player.current_tile.as_deref(), Some("Foyer"));
        assert_eq!(snap.player.previous_tile, None);
        assert_eq!(snap.grid.get("(0, 0)").map(String::as_str), Some("Foyer"));
        assert_eq!(snap.id_order.len(), session.deck().remaining());
    }

    #[test]
    fn test_json_field_names() {
        let session =
            Session::new(GameData::builtin().unwrap(), SessionConfig::with_seed(4)).unwrap();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"id_order\""));
        assert!(json.contains("\"attack_points\""));
        assert!(json.contains("\"has_totem\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["player"]["item"], serde_json::json!([]));
        assert!(value["player"].get("items").is_none());
        assert_eq!(value["player"]["position"], serde_json::json!([0, 0]));
    }
}
