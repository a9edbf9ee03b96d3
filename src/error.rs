//! Error types for structural level failures.
//!
//! Anything in here means a level asset is corrupt or incompatible and cannot
//! be played or meaningfully validated. Design findings are never errors; the
//! validator returns them as [`crate::validate::ValidationIssue`] data instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::tile::TileId;

/// Structural failure while loading or querying a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The text map could not be parsed.
    #[error("malformed level file (line {line}): {reason}")]
    MalformedLevelFile {
        /// 1-based line number where parsing failed (0 for whole-file problems).
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A tile identifier has no registry entry.
    #[error("unknown tile type {0}")]
    UnknownTileType(TileId),

    /// A tile coordinate lies outside the grid.
    #[error("tile ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        col: i32,
        /// Requested row.
        row: i32,
        /// Grid width in tiles.
        width: usize,
        /// Grid height in tiles.
        height: usize,
    },

    /// Cell count does not match `width * height`.
    #[error("grid of {width}x{height} needs {} cells, got {cells}", .width * .height)]
    GridSizeMismatch {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// Number of cells actually supplied.
        cells: usize,
    },

    /// Grid dimensions outside `1..=MAX_GRID_DIMENSION`.
    #[error("grid dimensions {width}x{height} are out of range")]
    InvalidDimensions {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// Engine configuration values are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a level or config file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be decoded.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File containing the bad document.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl LevelError {
    /// Shorthand for a [`LevelError::MalformedLevelFile`].
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLevelFile {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for structural level operations.
pub type LevelResult<T> = Result<T, LevelError>;
