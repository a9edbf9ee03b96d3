//! Benchmarks for collision queries.
//!
//! Box queries run once per moving entity per frame; they are the hot path.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use tilecheck::{EngineConfig, TileGrid, TileRegistry, World};

/// 64x64 map with a solid border and a wall every fourth column.
fn build_world() -> World {
    let mut grid = TileGrid::filled(64, 64, 0).unwrap();
    for row in 0..64 {
        for col in 0..64 {
            if row == 0 || row == 63 || col == 0 || col == 63 || (col % 4 == 0 && row % 3 != 0) {
                grid.set(col, row, 1).unwrap();
            }
        }
    }
    World::new(grid, Arc::new(TileRegistry::standard()), &EngineConfig::default()).unwrap()
}

fn bench_point_queries(c: &mut Criterion) {
    let world = build_world();

    c.bench_function("is_solid_at_pixel_sweep", |b| {
        b.iter(|| {
            let mut solid = 0u32;
            for y in (0..4096).step_by(37) {
                for x in (0..4096).step_by(37) {
                    solid += u32::from(world.is_solid_at_pixel(black_box(x), black_box(y)));
                }
            }
            black_box(solid)
        });
    });
}

fn bench_box_queries(c: &mut Criterion) {
    let world = build_world();

    c.bench_function("check_box_collision_1000", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for i in 0..1000 {
                let x = (i * 97) % 4000;
                let y = (i * 61) % 4000;
                hits += u32::from(world.check_box_collision(black_box(x), black_box(y), 48, 48));
            }
            black_box(hits)
        });
    });

    c.bench_function("check_box_collision_centered_1000", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for i in 0..1000 {
                let x = (i * 97) % 4000;
                let y = (i * 61) % 4000;
                hits += u32::from(world.check_box_collision_centered(
                    black_box(x),
                    black_box(y),
                    48,
                    48,
                ));
            }
            black_box(hits)
        });
    });
}

fn bench_visible_range(c: &mut Criterion) {
    let world = build_world();

    c.bench_function("visible_tile_range_cells", |b| {
        b.iter(|| {
            let range = world.visible_tile_range(black_box(500), black_box(300), 1280, 720);
            black_box(range.cells().count())
        });
    });
}

criterion_group!(
    benches,
    bench_point_queries,
    bench_box_queries,
    bench_visible_range
);
criterion_main!(benches);
