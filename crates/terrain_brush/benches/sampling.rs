mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use terrain_brush::sampling::{BrushSampling, DiskScatterSampling, GridSampling};

const BRUSH_RADII: [f32; 4] = [1.0, 5.0, 12.0, 25.0];
const GRID_STEPS: [f32; 3] = [0.25, 1.0, 2.5];

fn sampling_grid_benches(c: &mut Criterion) {
    for &step in &GRID_STEPS {
        let mut group = c.benchmark_group(format!("sampling/grid/step_{step:.2}"));
        let strategy = GridSampling::new(step);

        for &radius in &BRUSH_RADII {
            let mut rng = StdRng::seed_from_u64(0x6121D ^ (radius as u64));
            let expected = strategy.generate(radius, &mut rng).len();
            group.throughput(common::elements_throughput(expected));

            group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &r| {
                b.iter(|| {
                    let pts = strategy.generate(black_box(r), &mut rng);
                    black_box(pts.len());
                });
            });
        }

        group.finish();
    }
}

fn sampling_disk_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/disk_scatter");

    for attempts in [1u32, 10, 50] {
        let strategy = DiskScatterSampling::for_fill(attempts, 100.0);
        group.throughput(common::elements_throughput(strategy.count));
        let mut rng = StdRng::seed_from_u64(0xD15C ^ attempts as u64);

        group.bench_with_input(BenchmarkId::from_parameter(attempts), &attempts, |b, _| {
            b.iter(|| {
                let pts = strategy.generate(black_box(12.0), &mut rng);
                black_box(pts.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_grid_benches, sampling_disk_benches
}
criterion_main!(benches);
