//! Plain-text map format.
//!
//! One grid row per line, tile ids separated by any amount of whitespace,
//! blank lines ignored. No header and no trailing metadata. A file either
//! parses completely or fails with [`LevelError::MalformedLevelFile`].

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LevelError, LevelResult};
use crate::tile::{MAX_GRID_DIMENSION, TileGrid, TileId};

/// Parse a grid from the plain-text map format.
///
/// # Errors
///
/// Returns [`LevelError::MalformedLevelFile`] for an empty document, a token
/// that is not a non-negative decimal tile id, or rows whose length differs
/// from the first row. Rows or columns beyond [`MAX_GRID_DIMENSION`] are
/// malformed too.
pub fn parse_grid(text: &str) -> LevelResult<TileGrid> {
    let mut width = None;
    let mut height = 0usize;
    let mut cells: Vec<TileId> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let row_start = cells.len();
        for token in line.split_whitespace() {
            cells.push(parse_token(token, line_no)?);
        }
        let row_len = cells.len() - row_start;
        if row_len > MAX_GRID_DIMENSION {
            return Err(LevelError::malformed(
                line_no,
                format!("row has {row_len} tiles, limit is {MAX_GRID_DIMENSION}"),
            ));
        }

        match width {
            None => width = Some(row_len),
            Some(expected) if expected != row_len => {
                return Err(LevelError::malformed(
                    line_no,
                    format!("row has {row_len} tiles, expected {expected}"),
                ));
            }
            Some(_) => {}
        }
        height += 1;
        if height > MAX_GRID_DIMENSION {
            return Err(LevelError::malformed(
                line_no,
                format!("more than {MAX_GRID_DIMENSION} rows"),
            ));
        }
    }

    let Some(width) = width else {
        return Err(LevelError::malformed(0, "file contains no rows"));
    };

    let grid = TileGrid::new(width, height, cells)?;
    debug!(width, height, "parsed tile grid");
    Ok(grid)
}

fn parse_token(token: &str, line_no: usize) -> LevelResult<TileId> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LevelError::malformed(
            line_no,
            format!("token {token:?} is not a tile id"),
        ));
    }
    token.parse::<TileId>().map_err(|_| {
        LevelError::malformed(line_no, format!("tile id {token} is out of range"))
    })
}

/// Read and parse a map file.
///
/// # Errors
///
/// Returns [`LevelError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_grid`].
pub fn load_grid(path: &Path) -> LevelResult<TileGrid> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(&text)?;
    debug!(path = %path.display(), "loaded map file");
    Ok(grid)
}

/// Write a grid in the plain-text map format.
///
/// # Errors
///
/// Returns [`LevelError::Io`] if the file cannot be written.
pub fn save_grid(grid: &TileGrid, path: &Path) -> LevelResult<()> {
    fs::write(path, grid.to_text()).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let grid = parse_grid("1 1 1\n1 0 1\n1 1 1\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 1), Some(0));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_extra_whitespace() {
        let grid = parse_grid("\n  1\t 2   3 \n\n   \n4 5 6\n\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cells(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let grid = parse_grid("1 0\r\n0 1\r\n").unwrap();
        assert_eq!(grid.cells(), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = parse_grid("1 1\n1 x\n").unwrap_err();
        assert!(matches!(err, LevelError::MalformedLevelFile { line: 2, .. }));
    }

    #[test]
    fn test_parse_negative_and_signed() {
        assert!(matches!(
            parse_grid("1 -1\n"),
            Err(LevelError::MalformedLevelFile { line: 1, .. })
        ));
        assert!(matches!(
            parse_grid("+1 1\n"),
            Err(LevelError::MalformedLevelFile { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_out_of_range_id() {
        assert!(matches!(
            parse_grid("70000\n"),
            Err(LevelError::MalformedLevelFile { .. })
        ));
    }

    #[test]
    fn test_parse_ragged() {
        let err = parse_grid("1 1 1\n\n1 1\n").unwrap_err();
        assert!(matches!(err, LevelError::MalformedLevelFile { line: 3, .. }));
    }

    #[test]
    fn test_parse_oversized() {
        let wide = "0 ".repeat(MAX_GRID_DIMENSION + 1);
        assert!(matches!(
            parse_grid(&wide),
            Err(LevelError::MalformedLevelFile { line: 1, .. })
        ));

        let tall = "0\n".repeat(MAX_GRID_DIMENSION + 1);
        assert!(matches!(
            parse_grid(&tall),
            Err(LevelError::MalformedLevelFile { line, .. }) if line == MAX_GRID_DIMENSION + 1
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            parse_grid(""),
            Err(LevelError::MalformedLevelFile { line: 0, .. })
        ));
        assert!(matches!(
            parse_grid("\n   \n\t\n"),
            Err(LevelError::MalformedLevelFile { line: 0, .. })
        ));
    }

    #[test]
    fn test_text_round_trip() {
        let text = "1 1 1 1\n1 0 37 1\n1 1 1 1\n";
        assert_eq!(parse_grid(text).unwrap().to_text(), text);
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.txt");
        let grid = parse_grid("1 2\n3 4\n").unwrap();
        save_grid(&grid, &path).unwrap();
        assert_eq!(load_grid(&path).unwrap(), grid);

        let missing = dir.path().join("missing.txt");
        assert!(matches!(load_grid(&missing), Err(LevelError::Io { .. })));
    }
}
