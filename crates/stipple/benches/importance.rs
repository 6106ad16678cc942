mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use stipple::field::{EnergyField, Grid, Kernel};
use stipple::importance::{compute_importance, ImportanceParams};

const SIDES: [usize; 3] = [128, 256, 512];
const SIGMAS: [f32; 4] = [0.5, 0.9, 1.5, 3.0];

fn importance_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("importance/compute");
    let params = ImportanceParams::default();

    for &side in &SIDES {
        let brightness = common::radial_brightness(side);
        group.throughput(common::elements_throughput(side * side));
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let imp = compute_importance(black_box(&brightness), &params).unwrap();
                black_box(imp.len());
            });
        });
    }

    group.finish();
}

fn accumulate_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("energy/accumulate_kernel");

    for &sigma in &SIGMAS {
        let kernel = Kernel::repulsion(sigma).unwrap();
        let mut field = EnergyField::new(Grid::zeros(256, 256));
        group.throughput(common::elements_throughput(kernel.values().len()));
        group.bench_with_input(BenchmarkId::from_parameter(sigma), &sigma, |b, _| {
            let mut i = 0usize;
            b.iter(|| {
                // Walk the diagonal so stamps hit both interior and wrapping edges.
                i = (i + 1) % 256;
                field.accumulate_kernel(i, i, black_box(&kernel));
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = importance_benches, accumulate_benches
}
criterion_main!(benches);
