//! Engine configuration.
//!
//! One immutable value, loaded once by the composition root and passed by
//! reference into [`crate::World`] and [`crate::LevelValidator`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LevelError, LevelResult};
use crate::tile::TileId;

/// Side length of a square tile in pixels.
pub const TILE_SIZE: i32 = 64;

/// Tile id whose presence marks the level exit (the third ladder variant).
pub const LEVEL_COMPLETE_TILE: TileId = 37;

/// Thresholds for the map quality heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Solid-tile ratio above which a map is reported as cramped.
    pub cramped_ratio: f64,
    /// Solid-tile ratio below which a map is reported as very open.
    pub open_ratio: f64,
    /// Minimum comfortable width in tiles.
    pub min_width: usize,
    /// Minimum comfortable height in tiles.
    pub min_height: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            cramped_ratio: 0.7,
            open_ratio: 0.1,
            min_width: 10,
            min_height: 10,
        }
    }
}

/// Configuration shared by the collision world and the validator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tile size in pixels used for pixel to tile conversion.
    pub tile_size: i32,
    /// Tile id that completes the level.
    pub level_complete_tile: TileId,
    /// Map quality heuristics.
    pub quality: QualityThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            level_complete_tile: LEVEL_COMPLETE_TILE,
            quality: QualityThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds values rejected by [`EngineConfig::validate`].
    pub fn load(path: &Path) -> LevelResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| LevelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::InvalidConfig`] for a non-positive tile size,
    /// ratios outside `[0, 1]`, or an open ratio above the cramped ratio.
    pub fn validate(&self) -> LevelResult<()> {
        if self.tile_size <= 0 {
            return Err(LevelError::InvalidConfig(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        let q = &self.quality;
        for (name, ratio) in [("cramped_ratio", q.cramped_ratio), ("open_ratio", q.open_ratio)] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(LevelError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {ratio}"
                )));
            }
        }
        if q.open_ratio > q.cramped_ratio {
            return Err(LevelError::InvalidConfig(format!(
                "open_ratio {} exceeds cramped_ratio {}",
                q.open_ratio, q.cramped_ratio
            )));
        }
        Ok(())
    }
}
