//! Map summary command implementation.

use super::CliError;
use std::path::Path;
use tilecheck::tile::load_grid;
use tilecheck::{EngineConfig, TileGrid, TileId, TileRegistry};

/// Execute the map command.
///
/// # Errors
///
/// Returns an error if the map file cannot be loaded.
pub(crate) fn execute(map: &Path, config: &EngineConfig) -> Result<(), CliError> {
    let grid = load_grid(map)?;
    let registry = TileRegistry::standard();

    println!("Map: {}", map.display());
    print!("{}", summarize(&grid, &registry, config));
    println!();
    print!("{}", render_ascii(&grid, &registry, config));

    Ok(())
}

/// Size, solid ratio, exit location and unknown ids as text.
#[allow(clippy::cast_precision_loss)]
fn summarize(grid: &TileGrid, registry: &TileRegistry, config: &EngineConfig) -> String {
    let mut output = String::new();

    let solid = grid.count_where(|id| registry.is_solid_or_unknown(id));
    let ratio = solid as f64 / grid.len() as f64;
    output.push_str(&format!("  Size:        {}x{}\n", grid.width(), grid.height()));
    output.push_str(&format!("  Solid tiles: {solid} ({:.0}%)\n", ratio * 100.0));

    match grid.find(config.level_complete_tile) {
        Some(p) => output.push_str(&format!("  Exit:        tile({},{})\n", p.x, p.y)),
        None => output.push_str(&format!(
            "  Exit:        missing (id {})\n",
            config.level_complete_tile
        )),
    }

    let mut unknown: Vec<TileId> = grid
        .cells()
        .iter()
        .copied()
        .filter(|&id| !registry.is_known(id))
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    if !unknown.is_empty() {
        let ids: Vec<String> = unknown.iter().map(ToString::to_string).collect();
        output.push_str(&format!("  Unknown ids: {}\n", ids.join(", ")));
    }

    output
}

/// Draw the grid: `#` solid, `.` walkable, `E` exit, `~` slow, `?` unknown.
fn render_ascii(grid: &TileGrid, registry: &TileRegistry, config: &EngineConfig) -> String {
    let mut output = String::with_capacity(grid.len() + grid.height());
    for row in 0..grid.height() {
        for &id in grid.row(row).unwrap_or_default() {
            let symbol = if id == config.level_complete_tile {
                'E'
            } else {
                match registry.properties(id) {
                    Err(_) => '?',
                    Ok(p) if p.solid => '#',
                    Ok(p) if p.slow => '~',
                    Ok(_) => '.',
                }
            };
            output.push(symbol);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecheck::tile::parse_grid;

    #[test]
    fn test_render_ascii() {
        let grid = parse_grid("1 1 1 1\n1 2 37 99\n1 1 1 1\n").unwrap();
        let text = render_ascii(&grid, &TileRegistry::standard(), &EngineConfig::default());
        assert_eq!(text, "####\n#~E?\n####\n");
    }

    #[test]
    fn test_summarize() {
        let grid = parse_grid("1 1\n0 99\n").unwrap();
        let text = summarize(&grid, &TileRegistry::standard(), &EngineConfig::default());
        assert!(text.contains("2x2"));
        assert!(text.contains("3 (75%)"));
        assert!(text.contains("missing (id 37)"));
        assert!(text.contains("Unknown ids: 99"));
    }
}
