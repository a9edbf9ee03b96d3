//! Collision world: pixel-space queries against the live grid.
//!
//! Out-of-grid policy: any sample outside the grid, on any side, is solid.
//! Unknown tile ids are solid as well, and are logged.

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::LevelResult;
use crate::tile::{Point, TileGrid, TileId, TileProperties, TileRegistry, pixel_to_tile};

/// Grid plus registry, answering the movement code's collision queries.
///
/// The grid sits behind an `Arc` so renderers and other readers can hold a
/// snapshot. [`World::replace_grid`] swaps in a whole new grid; a grid is never
/// edited in place while queries can see it.
#[derive(Debug, Clone)]
pub struct World {
    grid: Arc<TileGrid>,
    registry: Arc<TileRegistry>,
    tile_size: i32,
}

impl World {
    /// Create a world over `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LevelError::InvalidConfig`] if `config` fails
    /// [`EngineConfig::validate`].
    pub fn new(
        grid: TileGrid,
        registry: Arc<TileRegistry>,
        config: &EngineConfig,
    ) -> LevelResult<Self> {
        config.validate()?;
        Ok(Self {
            grid: Arc::new(grid),
            registry,
            tile_size: config.tile_size,
        })
    }

    /// The current grid.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// A shared handle to the current grid that stays valid across swaps.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TileGrid> {
        Arc::clone(&self.grid)
    }

    /// The tile registry.
    #[must_use]
    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Tile size in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Swap in a new grid (e.g. on level load), returning the previous one.
    pub fn replace_grid(&mut self, grid: TileGrid) -> Arc<TileGrid> {
        debug!(
            width = grid.width(),
            height = grid.height(),
            "replacing world grid"
        );
        std::mem::replace(&mut self.grid, Arc::new(grid))
    }

    /// Tile id at a tile coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LevelError::OutOfBounds`] outside the grid.
    pub fn tile_at(&self, col: i32, row: i32) -> LevelResult<TileId> {
        self.grid.tile_at(col, row)
    }

    /// Properties of the tile under a pixel.
    ///
    /// `None` outside the grid or for an unknown tile id.
    fn properties_at_pixel(&self, x: i32, y: i32) -> Option<TileProperties> {
        let col = pixel_to_tile(x, self.tile_size);
        let row = pixel_to_tile(y, self.tile_size);
        let id = self.grid.get(col, row)?;
        match self.registry.properties(id) {
            Ok(props) => Some(props),
            Err(err) => {
                warn!(col, row, %err, "collision query hit unregistered tile");
                None
            }
        }
    }

    /// Whether the pixel is blocked.
    #[must_use]
    #[inline]
    pub fn is_solid_at_pixel(&self, x: i32, y: i32) -> bool {
        self.properties_at_pixel(x, y).is_none_or(|p| p.solid)
    }

    /// Whether the pixel lies on a slowing tile.
    #[must_use]
    pub fn is_slow_at_pixel(&self, x: i32, y: i32) -> bool {
        self.properties_at_pixel(x, y).is_some_and(|p| p.slow)
    }

    /// Whether the pixel lies on a shadowed tile.
    #[must_use]
    pub fn is_shadow_at_pixel(&self, x: i32, y: i32) -> bool {
        self.properties_at_pixel(x, y).is_some_and(|p| p.shadow)
    }

    /// Whether the box `[x, x+width-1] x [y, y+height-1]` hits anything solid.
    ///
    /// Samples only the four corners and the center (see [`box_samples`]); an
    /// obstacle narrower than the box can slip between samples. Level content
    /// is tuned against exactly this sampling.
    #[must_use]
    pub fn check_box_collision(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        box_samples(x, y, width, height)
            .iter()
            .any(|p| self.is_solid_at_pixel(p.x, p.y))
    }

    /// [`World::check_box_collision`] for a box given by its center.
    ///
    /// The top-left corner is `(cx - width/2, cy - height/2)` with truncating
    /// division.
    #[must_use]
    pub fn check_box_collision_centered(&self, cx: i32, cy: i32, width: i32, height: i32) -> bool {
        self.check_box_collision(
            cx.saturating_sub(width / 2),
            cy.saturating_sub(height / 2),
            width,
            height,
        )
    }

    /// Tiles a camera view overlaps, clipped to the grid.
    ///
    /// Ranges are start-inclusive, end-exclusive, with one extra tile of
    /// overscan at the end so partially visible edge tiles get drawn.
    #[must_use]
    pub fn visible_tile_range(
        &self,
        camera_x: i32,
        camera_y: i32,
        view_width: i32,
        view_height: i32,
    ) -> TileRange {
        let (col_start, col_end) =
            visible_span(camera_x, view_width, self.tile_size, self.grid.width());
        let (row_start, row_end) =
            visible_span(camera_y, view_height, self.tile_size, self.grid.height());
        TileRange {
            col_start,
            col_end,
            row_start,
            row_end,
        }
    }
}

/// The five pixels [`World::check_box_collision`] samples, in order:
/// top-left, top-right, bottom-left, bottom-right, center.
#[must_use]
pub fn box_samples(x: i32, y: i32, width: i32, height: i32) -> [Point; 5] {
    let right = x.saturating_add(width).saturating_sub(1);
    let bottom = y.saturating_add(height).saturating_sub(1);
    [
        Point::new(x, y),
        Point::new(right, y),
        Point::new(x, bottom),
        Point::new(right, bottom),
        Point::new(x.saturating_add(width / 2), y.saturating_add(height / 2)),
    ]
}

fn visible_span(camera: i32, view: i32, tile_size: i32, limit: usize) -> (usize, usize) {
    let first = pixel_to_tile(camera, tile_size);
    let last = pixel_to_tile(camera.saturating_add(view), tile_size).saturating_add(1);
    let clamp = |t: i32| usize::try_from(t).map_or(0, |t| t.min(limit));
    let start = clamp(first);
    let end = clamp(last).max(start);
    (start, end)
}

/// Rectangle of tile indices, start-inclusive and end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileRange {
    /// First visible column.
    pub col_start: usize,
    /// One past the last visible column.
    pub col_end: usize,
    /// First visible row.
    pub row_start: usize,
    /// One past the last visible row.
    pub row_end: usize,
}

impl TileRange {
    /// Column indices.
    #[must_use]
    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    /// Row indices.
    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    /// Number of tiles covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cols().len() * self.rows().len()
    }

    /// Whether no tile is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(col, row)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols();
        self.rows()
            .flat_map(move |row| cols.clone().map(move |col| (col, row)))
    }
}
