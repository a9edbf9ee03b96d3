//! Benchmarks for level validation.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tilecheck::level::{Food, Snail, Spider, Tripwire};
use tilecheck::{EngineConfig, LevelData, LevelValidator, Point, TileGrid, TileRegistry};

/// Walled square level with a spread of entities.
fn build_level(size: i32) -> LevelData {
    let side = usize::try_from(size).unwrap();
    let mut grid = TileGrid::filled(side, side, 0).unwrap();
    for i in 0..size {
        for (col, row) in [(i, 0), (i, size - 1), (0, i), (size - 1, i)] {
            grid.set(col, row, 1).unwrap();
        }
    }
    grid.set(size - 2, size - 2, 37).unwrap();

    let mut level = LevelData::with_grid(grid);
    level.player_spawn = Some(Point::new(96, 96));
    for i in 1..size - 1 {
        level
            .spiders
            .push(Spider::new(vec![Point::new(i, 1), Point::new(i, size - 2)]));
        level.snails.push(Snail::new(Point::new(i * 64, 100), None));
        level.food.push(Food::new(Point::new(i, 2), "CRUMB"));
        level.tripwires.push(Tripwire::new(Point::new(i * 64, 200)));
    }
    level
}

fn bench_validate(c: &mut Criterion) {
    let registry = TileRegistry::standard();
    let config = EngineConfig::default();
    let validator = LevelValidator::new(&registry, &config).unwrap();

    let mut group = c.benchmark_group("validate");
    for size in [16, 64, 256] {
        let level = build_level(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &level, |b, level| {
            b.iter(|| black_box(validator.validate(black_box(level))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
