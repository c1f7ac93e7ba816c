//! Loading tile and card definitions.
//!
//! The data file keeps the layout the game has always shipped with:
//!
//! ```text
//! {
//!   "tilesCard": [ { "outDoor": [tile, ...] }, { "inDoor": [tile, ...] } ],
//!   "devCard":   [ { "id", "9:00", "10:00", "11:00", "item", "attack_points" }, ... ]
//! }
//! ```
//!
//! where each tile is `{ "id", "name", "wall": [l, u, r, d], "special" }`
//! and a wall entry is 0 (open) or 1 (blocked).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::game::{
    CONNECTOR_TILE, DEFAULT_RESHUFFLE_DISCARD, DevCard, Environment, START_TILE, Tile, Wall,
    zombie_count,
};

/// The data file bundled with the binary.
pub const BUILTIN_DATA: &str = include_str!("../data/game_data.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawData {
    tiles_card: Vec<RawTileGroup>,
    dev_card: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTileGroup {
    #[serde(default)]
    out_door: Option<Vec<RawTile>>,
    #[serde(default)]
    in_door: Option<Vec<RawTile>>,
}

#[derive(Debug, Deserialize)]
struct RawTile {
    id: u32,
    name: String,
    wall: Vec<u8>,
    #[serde(default)]
    special: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    id: u32,
    #[serde(rename = "9:00")]
    nine: String,
    #[serde(rename = "10:00")]
    ten: String,
    #[serde(rename = "11:00")]
    eleven: String,
    item: String,
    attack_points: i32,
}

/// Validated tiles and cards, ready to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameData {
    /// Indoor tiles, the starting tile included.
    pub indoor: Vec<Tile>,
    /// Outdoor tiles, the connector included.
    pub outdoor: Vec<Tile>,
    /// Development cards.
    pub cards: Vec<DevCard>,
}

impl GameData {
    /// Parse the bundled data file.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled file itself is broken.
    pub fn builtin() -> Result<Self, ConfigError> {
        BUILTIN_DATA.parse()
    }

    /// Read and validate a data file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Self = json.parse()?;
        debug!(
            path = %path.display(),
            tiles = data.tile_count(),
            cards = data.cards.len(),
            "game data loaded"
        );
        Ok(data)
    }

    /// Number of tiles across both groups.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.indoor.len() + self.outdoor.len()
    }

    /// Check every rule the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self, discard: usize) -> Result<(), ConfigError> {
        let mut tile_ids = BTreeSet::new();
        for tile in self.indoor.iter().chain(&self.outdoor) {
            if tile.name.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    kind: "tile",
                    id: tile.id,
                    field: "name",
                });
            }
            if !tile_ids.insert(tile.id) {
                return Err(ConfigError::DuplicateId {
                    kind: "tile",
                    id: tile.id,
                });
            }
        }
        if !self.indoor.iter().any(|t| t.is_named(START_TILE)) {
            return Err(ConfigError::MissingTile(START_TILE));
        }
        if !self.outdoor.iter().any(|t| t.is_named(CONNECTOR_TILE)) {
            return Err(ConfigError::MissingTile(CONNECTOR_TILE));
        }

        let mut card_ids = BTreeSet::new();
        for card in &self.cards {
            if !card_ids.insert(card.id) {
                return Err(ConfigError::DuplicateId {
                    kind: "card",
                    id: card.id,
                });
            }
            if card.item.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    kind: "card",
                    id: card.id,
                    field: "item",
                });
            }
            for event in &card.events {
                if event.to_lowercase().contains("zombies") && zombie_count(event).is_none() {
                    return Err(ConfigError::ZombieCount {
                        id: card.id,
                        event: event.clone(),
                    });
                }
            }
        }
        if self.cards.len() <= discard {
            return Err(ConfigError::DeckTooSmall {
                cards: self.cards.len(),
                discard,
            });
        }
        Ok(())
    }
}

impl FromStr for GameData {
    type Err = ConfigError;

    /// Parse and validate JSON text against the default reshuffle discard.
    fn from_str(json: &str) -> Result<Self, Self::Err> {
        let raw: RawData = serde_json::from_str(json)?;

        let mut indoor = None;
        let mut outdoor = None;
        for group in raw.tiles_card {
            if let Some(tiles) = group.out_door {
                outdoor = Some(convert_tiles(tiles, Environment::Outdoor)?);
            }
            if let Some(tiles) = group.in_door {
                indoor = Some(convert_tiles(tiles, Environment::Indoor)?);
            }
        }

        let data = Self {
            indoor: indoor.ok_or(ConfigError::MissingGroup("inDoor"))?,
            outdoor: outdoor.ok_or(ConfigError::MissingGroup("outDoor"))?,
            cards: raw
                .dev_card
                .into_iter()
                .map(|c| DevCard {
                    id: c.id,
                    events: [c.nine, c.ten, c.eleven],
                    item: c.item,
                    attack_points: c.attack_points,
                })
                .collect(),
        };
        data.validate(DEFAULT_RESHUFFLE_DISCARD)?;
        Ok(data)
    }
}

fn convert_tiles(raw: Vec<RawTile>, environment: Environment) -> Result<Vec<Tile>, ConfigError> {
    raw.into_iter()
        .map(|t| {
            if t.wall.len() != 4 {
                return Err(ConfigError::WallCount {
                    name: t.name,
                    count: t.wall.len(),
                });
            }
            let mut walls = [Wall::Open; 4];
            for (slot, bit) in walls.iter_mut().zip(&t.wall) {
                *slot = Wall::from_bit(*bit).ok_or_else(|| ConfigError::WallValue {
                    name: t.name.clone(),
                    value: *bit,
                })?;
            }
            let mut tile = Tile::new(t.id, t.name, environment, walls);
            tile.special = t.special.filter(|s| !s.trim().is_empty());
            Ok(tile)
        })
        .collect()
}
