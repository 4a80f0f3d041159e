//! Tick throughput over a generated world.
//!
//! Run with: cargo bench --package outlast-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use outlast_core::prelude::*;

fn generated_engine(enemy_count: u32) -> SimulationEngine {
    let mut config = SimConfig::default();
    config.generation.enemy_count = enemy_count;
    let mut engine = SimulationEngine::new(config).expect("bench config is valid");
    engine.generate();
    engine
}

fn bench_engine_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_update");
    // Walk and swing every frame so movement, collision and combat all run
    let input = InputSnapshot::idle(Vec2::new(1600.0, 1550.0))
        .with_forward()
        .with_primary();

    for enemies in [0u32, 10, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(enemies), &enemies, |b, &n| {
            let mut engine = generated_engine(n);
            b.iter(|| {
                if engine.player().dead {
                    engine.respawn();
                }
                black_box(engine.update(black_box(1.0 / 60.0), &input))
            });
        });
    }

    group.finish();
}

fn bench_collision_query(c: &mut Criterion) {
    let engine = generated_engine(0);
    let world = engine.world();
    let probes: Vec<Vec2> = world.harvestables.iter().map(|h| h.position).collect();

    c.bench_function("query_collision_all_nodes", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|p| world.query_collision(p.x, p.y, 20.0).is_some())
                .count()
        })
    });
}

criterion_group!(benches, bench_engine_update, bench_collision_query);
criterion_main!(benches);
