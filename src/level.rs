//! Declarative level description.
//!
//! A [`LevelData`] is what the editor produces: the tile grid, entity
//! placements and mechanic flags. JSON is the interchange format. Nothing in
//! here judges whether the level is any good; that is [`crate::validate`]'s job.

mod entities;
mod mechanics;

pub use entities::{ENERGY_SEED, EntityKind, Food, Snail, Spider, Tripwire};
pub use mechanics::Mechanics;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LevelError, LevelResult};
use crate::tile::{Point, TileGrid};

/// One level: grid, entities and mechanics.
///
/// Entity lists keep author order; the validator reports issues in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tile grid.
    pub grid: TileGrid,
    /// Player start in pixel space.
    #[serde(default)]
    pub player_spawn: Option<Point>,
    /// Toy start in pixel space.
    #[serde(default)]
    pub toy_spawn: Option<Point>,
    /// Spiders.
    #[serde(default)]
    pub spiders: Vec<Spider>,
    /// Snails.
    #[serde(default)]
    pub snails: Vec<Snail>,
    /// Food items.
    #[serde(default)]
    pub food: Vec<Food>,
    /// Tripwires.
    #[serde(default)]
    pub tripwires: Vec<Tripwire>,
    /// Enabled mechanics.
    #[serde(default)]
    pub mechanics: Mechanics,
}

impl LevelData {
    /// An empty level around `grid`: no spawns, no entities, all mechanics off.
    #[must_use]
    pub fn with_grid(grid: TileGrid) -> Self {
        Self {
            name: None,
            grid,
            player_spawn: None,
            toy_spawn: None,
            spiders: Vec::new(),
            snails: Vec::new(),
            food: Vec::new(),
            tripwires: Vec::new(),
            mechanics: Mechanics::default(),
        }
    }

    /// Parse a level from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns the decode error, which also covers grids whose cell count
    /// does not match their dimensions.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a level from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Io`] if the file cannot be read and
    /// [`LevelError::Json`] if it does not decode into a level.
    pub fn load(path: &Path) -> LevelResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&text).map_err(|source| LevelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            width = level.grid.width(),
            height = level.grid.height(),
            entities = level.entity_count(),
            "loaded level"
        );
        Ok(level)
    }

    /// Write the level as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> LevelResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| LevelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Display name, or `"<unnamed>"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Number of placed entities, spawns included.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        usize::from(self.player_spawn.is_some())
            + usize::from(self.toy_spawn.is_some())
            + self.spiders.len()
            + self.snails.len()
            + self.food.len()
            + self.tripwires.len()
    }
}
