#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilecheck::level::{Food, Snail, Spider, Tripwire};
use tilecheck::validate::{IssueCategory, Severity};
use tilecheck::{EngineConfig, LevelData, LevelValidator, Point, TileGrid, TileRegistry, World};

/// Structured level input.
#[derive(Arbitrary, Debug)]
struct LevelInput {
    /// Grid width (capped).
    width: u8,
    /// Grid height (capped).
    height: u8,
    /// Cell ids, cycled to fill the grid.
    cells: Vec<u16>,
    player: Option<(i32, i32)>,
    toy: Option<(i32, i32)>,
    spiders: Vec<Vec<(i32, i32)>>,
    snails: Vec<((i32, i32), bool)>,
    food: Vec<((i32, i32), bool)>,
    tripwires: Vec<(i32, i32)>,
    flags: [bool; 3],
    /// Box query run against the same grid.
    probe: (i32, i32, i32, i32),
}

fn point((x, y): (i32, i32)) -> Point {
    Point::new(x, y)
}

fuzz_target!(|input: LevelInput| {
    let width = usize::from(input.width % 32) + 1;
    let height = usize::from(input.height % 32) + 1;
    let cells: Vec<u16> = if input.cells.is_empty() {
        vec![0; width * height]
    } else {
        input.cells.iter().copied().cycle().take(width * height).collect()
    };
    let Ok(grid) = TileGrid::new(width, height, cells) else {
        return;
    };

    let mut level = LevelData::with_grid(grid.clone());
    level.player_spawn = input.player.map(point);
    level.toy_spawn = input.toy.map(point);
    level.spiders = input
        .spiders
        .into_iter()
        .take(16)
        .map(|w| Spider::new(w.into_iter().take(16).map(point).collect()))
        .collect();
    level.snails = input
        .snails
        .into_iter()
        .take(16)
        .map(|(p, talks)| Snail::new(point(p), talks.then_some("hi")))
        .collect();
    level.food = input
        .food
        .into_iter()
        .take(16)
        .map(|(p, seed)| Food::new(point(p), if seed { "ENERGY_SEED" } else { "CRUMB" }))
        .collect();
    level.tripwires = input.tripwires.into_iter().take(16).map(|p| Tripwire::new(point(p))).collect();
    level.mechanics.toy_enabled = input.flags[0];
    level.mechanics.speed_boost_food_enabled = input.flags[1];
    level.mechanics.trip_wires_enabled = input.flags[2];

    let registry = TileRegistry::standard();
    let config = EngineConfig::default();
    let validator = LevelValidator::new(&registry, &config).expect("default config is valid");

    // Must never panic, and must be deterministic.
    let issues = validator.validate(&level);
    assert_eq!(issues, validator.validate(&level));

    // Missing player spawn is always the first finding.
    if level.player_spawn.is_none() {
        assert_eq!(issues[0].category(), IssueCategory::Spawn);
        assert_eq!(issues[0].severity(), Severity::Error);
    }

    let (x, y, w, h) = input.probe;
    let world = World::new(grid, Arc::new(registry), &config).expect("default config is valid");
    let _ = world.check_box_collision(x, y, w, h);
    let _ = world.check_box_collision_centered(x, y, w, h);
    let _ = world.visible_tile_range(x, y, w, h);
});
