//! Collision probe command implementation.

use super::CliError;
use std::path::Path;
use std::sync::Arc;
use tilecheck::tile::{box_samples, load_grid, pixel_to_tile};
use tilecheck::{EngineConfig, TileRegistry, World};

/// Execute the probe command.
///
/// `size` is `(width, height)` for a box query, `None` for a point query.
///
/// # Errors
///
/// Returns an error if the map file cannot be loaded.
pub(crate) fn execute(
    map: &Path,
    config: &EngineConfig,
    x: i32,
    y: i32,
    size: Option<(i32, i32)>,
    centered: bool,
) -> Result<(), CliError> {
    let world = World::new(load_grid(map)?, Arc::new(TileRegistry::standard()), config)?;
    print!("{}", probe(&world, x, y, size, centered));
    Ok(())
}

fn probe(world: &World, x: i32, y: i32, size: Option<(i32, i32)>, centered: bool) -> String {
    let Some((width, height)) = size else {
        return format!(
            "point ({x},{y}) -> {}: {}\n",
            describe_tile(world, x, y),
            verdict(world.is_solid_at_pixel(x, y))
        );
    };

    let (left, top) = if centered {
        (x.saturating_sub(width / 2), y.saturating_sub(height / 2))
    } else {
        (x, y)
    };
    let hit = world.check_box_collision(left, top, width, height);

    let mut output = format!("box ({left},{top}) {width}x{height}: {}\n", verdict(hit));
    for p in box_samples(left, top, width, height) {
        output.push_str(&format!(
            "  sample ({},{}) -> {}: {}\n",
            p.x,
            p.y,
            describe_tile(world, p.x, p.y),
            verdict(world.is_solid_at_pixel(p.x, p.y))
        ));
    }
    output
}

fn describe_tile(world: &World, x: i32, y: i32) -> String {
    let col = pixel_to_tile(x, world.tile_size());
    let row = pixel_to_tile(y, world.tile_size());
    match world.tile_at(col, row) {
        Ok(id) => format!("tile({col},{row}) id {id}"),
        Err(_) => format!("tile({col},{row}) outside map"),
    }
}

const fn verdict(solid: bool) -> &'static str {
    if solid { "solid" } else { "clear" }
}
