//! Tile layer.
//!
//! - Registry mapping tile ids to semantic properties
//! - Row-major tile grid with bounds-checked lookup
//! - Text map loading and saving
//! - Collision world answering point and box queries in pixel space

mod grid;
mod loader;
mod registry;
mod world;

pub use grid::{MAX_GRID_DIMENSION, TileGrid};
pub use loader::{load_grid, parse_grid, save_grid};
pub use registry::{TileAtlas, TileCategory, TileImageProvider, TileProperties, TileRegistry};
pub use world::{TileRange, World, box_samples};

use serde::{Deserialize, Serialize};

/// Identifier of a tile's semantic type.
pub type TileId = u16;

/// An integer coordinate pair.
///
/// Whether it is in pixel or tile space depends on where it is stored; see
/// the entity types in [`crate::level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (column in tile space).
    pub x: i32,
    /// Vertical coordinate (row in tile space).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a pixel-space point to the tile containing it.
    #[must_use]
    pub const fn to_tile(self, tile_size: i32) -> Self {
        Self {
            x: pixel_to_tile(self.x, tile_size),
            y: pixel_to_tile(self.y, tile_size),
        }
    }
}

/// Convert a pixel coordinate to a tile coordinate.
///
/// Floor division, so `-1` lands in tile `-1` rather than tile `0`.
#[must_use]
#[inline]
pub const fn pixel_to_tile(pixel: i32, tile_size: i32) -> i32 {
    pixel.div_euclid(tile_size)
}
