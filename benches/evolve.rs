//! Generation throughput for different grid sizes and row-block sizes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use lifegrid::{GenerationEngine, Grid, step_serial};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for side in [64usize, 256, 1024] {
        let current = Grid::random(side, side, 0.3, 42);
        let mut next = Grid::new(side, side);
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("serial", side), &side, |b, _| {
            b.iter(|| step_serial(black_box(&current), &mut next))
        });

        for chunk_rows in [1, 8, 32] {
            let engine = GenerationEngine::new(chunk_rows);
            group.bench_with_input(
                BenchmarkId::new(format!("parallel/rows{chunk_rows}"), side),
                &side,
                |b, _| b.iter(|| engine.step(black_box(&current), &mut next)),
            );
        }
    }

    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let soup = Grid::random(512, 512, 0.3, 7);
    c.bench_function("run/512x512x100", |b| {
        b.iter(|| lifegrid::run(black_box(soup.clone()), 100))
    });
}

criterion_group!(benches, bench_step, bench_run);
criterion_main!(benches);
