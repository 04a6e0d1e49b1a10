//! Criterion benchmarks for the all-pairs proximity scan and the fight sweep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use npc_arena::combat::{fight, pairs_within};
use npc_arena::core::types::Bounds;
use npc_arena::entity::NpcHandle;
use npc_arena::factory::NpcFactory;

fn population(count: usize) -> Vec<NpcHandle> {
    NpcFactory::with_seed(Bounds::SIMULATION, 42).spawn_random(count)
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairs_within");
    for count in [50usize, 200, 500] {
        let npcs = population(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &npcs, |b, npcs| {
            b.iter(|| pairs_within(black_box(npcs), |npc| f64::from(npc.params().kill_distance)))
        });
    }
    group.finish();
}

fn bench_fight(c: &mut Criterion) {
    c.bench_function("fight_200_range_10", |b| {
        b.iter_batched(
            || population(200),
            |mut npcs| fight(&mut npcs, black_box(10.0)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_scan, bench_fight);
criterion_main!(benches);
