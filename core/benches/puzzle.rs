use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::*;

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("puzzle");
    group.sample_size(20);
    for serial in ["SN-001", "SN-002", "A1B2C3"] {
        group.bench_function(serial, |b| b.iter(|| puzzle::solve(black_box(serial))));
    }
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let size = GridSize::new(32, 32).unwrap();
    let script = CommandScript::parse(&"MMLMMRMRMMLL".repeat(16)).unwrap();
    let mines: Vec<Mine> = Vec::new();

    c.bench_function("dispatch_no_mines", |b| {
        b.iter(|| execute(size, black_box(&mines[..]), black_box(&script)))
    });
}

criterion_group!(benches, bench_solve, bench_dispatch);
criterion_main!(benches);
