//! Row-major tile grid.

// Dimensions are capped at MAX_GRID_DIMENSION, so index <-> i32 casts are lossless.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use serde::{Deserialize, Serialize};

use crate::error::{LevelError, LevelResult};
use crate::tile::{Point, TileId};

/// Largest accepted width or height, in tiles.
pub const MAX_GRID_DIMENSION: usize = 65_535;

/// Serialized shape of a grid, checked before it becomes a [`TileGrid`].
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<TileId>,
}

impl TryFrom<RawGrid> for TileGrid {
    type Error = LevelError;

    fn try_from(raw: RawGrid) -> LevelResult<Self> {
        TileGrid::new(raw.width, raw.height, raw.cells)
    }
}

/// The tile ids of one level.
///
/// `cells.len() == width * height` always holds; cell `(col, row)` lives at
/// `cells[row * width + col]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<TileId>,
}

impl TileGrid {
    /// Create a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::InvalidDimensions`] if either dimension is zero or
    /// above [`MAX_GRID_DIMENSION`], and [`LevelError::GridSizeMismatch`] if
    /// `cells` does not hold exactly `width * height` ids.
    pub fn new(width: usize, height: usize, cells: Vec<TileId>) -> LevelResult<Self> {
        check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(LevelError::GridSizeMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid with every cell set to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::InvalidDimensions`] for unusable dimensions.
    pub fn filled(width: usize, height: usize, id: TileId) -> LevelResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![id; width * height],
        })
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[TileId] {
        &self.cells
    }

    /// Check if a tile coordinate is inside the grid.
    #[must_use]
    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some()
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let col = usize::try_from(col).ok().filter(|&c| c < self.width)?;
        let row = usize::try_from(row).ok().filter(|&r| r < self.height)?;
        Some(row * self.width + col)
    }

    /// Tile id at a tile coordinate, or `None` outside the grid.
    #[must_use]
    #[inline]
    pub fn get(&self, col: i32, row: i32) -> Option<TileId> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Tile id at a tile coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn tile_at(&self, col: i32, row: i32) -> LevelResult<TileId> {
        self.get(col, row).ok_or(LevelError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        })
    }

    /// Overwrite one cell.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn set(&mut self, col: i32, row: i32, id: TileId) -> LevelResult<()> {
        let idx = self.index(col, row).ok_or(LevelError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        })?;
        self.cells[idx] = id;
        Ok(())
    }

    /// Iterate over all cells in row-major order with their tile coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (Point, TileId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, &id)| {
            let x = (idx % width) as i32;
            let y = (idx / width) as i32;
            (Point::new(x, y), id)
        })
    }

    /// One row of cells, or `None` if `row >= height`.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[TileId]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        self.cells.get(start..start + self.width)
    }

    /// Count cells whose id satisfies `pred`.
    pub fn count_where(&self, mut pred: impl FnMut(TileId) -> bool) -> usize {
        self.cells.iter().filter(|&&id| pred(id)).count()
    }

    /// First cell (row-major) holding `id`.
    #[must_use]
    pub fn find(&self, id: TileId) -> Option<Point> {
        self.iter().find(|&(_, cell)| cell == id).map(|(p, _)| p)
    }

    /// Coordinates on the outer ring in scan order: top row, bottom row,
    /// left column, right column. Corners appear in both their row and column.
    pub fn border(&self) -> impl Iterator<Item = Point> + '_ {
        let w = self.width as i32;
        let h = self.height as i32;
        let top = (0..w).map(|x| Point::new(x, 0));
        let bottom = (0..w).map(move |x| Point::new(x, h - 1));
        let left = (0..h).map(|y| Point::new(0, y));
        let right = (0..h).map(move |y| Point::new(w - 1, y));
        top.chain(bottom).chain(left).chain(right)
    }

    /// Render in the plain-text map format: one row per line, ids separated
    /// by single spaces, trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3);
        for row in self.cells.chunks(self.width) {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

fn check_dimensions(width: usize, height: usize) -> LevelResult<()> {
    let range = 1..=MAX_GRID_DIMENSION;
    if range.contains(&width) && range.contains(&height) {
        Ok(())
    } else {
        Err(LevelError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TileGrid {
        // 3 wide, 2 high
        TileGrid::new(3, 2, vec![1, 1, 1, 0, 37, 2]).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = sample();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn test_grid_size_mismatch() {
        assert!(matches!(
            TileGrid::new(3, 2, vec![0; 5]),
            Err(LevelError::GridSizeMismatch { cells: 5, .. })
        ));
    }

    #[test]
    fn test_grid_zero_size() {
        assert!(matches!(
            TileGrid::filled(0, 4, 0),
            Err(LevelError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            TileGrid::new(4, 0, vec![]),
            Err(LevelError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_row_major_lookup() {
        let grid = sample();
        assert_eq!(grid.tile_at(0, 0).unwrap(), 1);
        assert_eq!(grid.tile_at(1, 1).unwrap(), 37);
        assert_eq!(grid.tile_at(2, 1).unwrap(), 2);
    }

    #[test]
    fn test_tile_at_out_of_bounds() {
        let grid = sample();
        for (col, row) in [(-1, 0), (0, -1), (3, 0), (0, 2)] {
            assert!(matches!(
                grid.tile_at(col, row),
                Err(LevelError::OutOfBounds { .. })
            ));
            assert!(grid.get(col, row).is_none());
        }
    }

    #[test]
    fn test_set() {
        let mut grid = sample();
        grid.set(0, 1, 5).unwrap();
        assert_eq!(grid.get(0, 1), Some(5));
        assert!(grid.set(3, 1, 5).is_err());
    }

    #[test]
    fn test_iter_and_find() {
        let grid = sample();
        let coords: Vec<Point> = grid.iter().map(|(p, _)| p).collect();
        assert_eq!(coords[4], Point::new(1, 1));
        assert_eq!(grid.find(37), Some(Point::new(1, 1)));
        assert_eq!(grid.find(99), None);
        assert_eq!(grid.count_where(|id| id == 1), 3);
        assert_eq!(grid.row(1), Some(&[0, 37, 2][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn test_border_order() {
        let grid = TileGrid::filled(3, 3, 0).unwrap();
        let border: Vec<Point> = grid.border().collect();
        assert_eq!(border.len(), 12);
        assert_eq!(border[0], Point::new(0, 0));
        assert_eq!(border[3], Point::new(0, 2));
        assert_eq!(border[6], Point::new(0, 0));
        assert_eq!(border[11], Point::new(2, 2));
        assert!(!border.contains(&Point::new(1, 1)));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(sample().to_text(), "1 1 1\n0 37 2\n");
    }

    #[test]
    fn test_deserialize_checks_size() {
        let ok: TileGrid =
            serde_json::from_str(r#"{"width":2,"height":1,"cells":[0,1]}"#).unwrap();
        assert_eq!(ok.get(1, 0), Some(1));

        let bad = serde_json::from_str::<TileGrid>(r#"{"width":2,"height":2,"cells":[0,1]}"#);
        assert!(bad.is_err());
    }
}
