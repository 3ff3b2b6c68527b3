//! Criterion benchmarks for hashing and end-to-end matching.
//! Field sizes reflect the intended use: point lists pre-truncated to the
//! brightest few dozen detections.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector2;

use astralign::asterism::{quads, triangles};
use astralign::geometry::transform_matrix;
use astralign::matcher::{find_transform, MatchCfg};
use astralign::sim::{disturbed_pair, scatter, FieldCfg};

fn bench_hashes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashes");
    for &n in &[10usize, 20, 30] {
        let xy = scatter(n, 43);
        group.bench_with_input(BenchmarkId::new("quads", n), &xy, |b, xy| {
            b.iter(|| quads::hashes(xy, quads::DEFAULT_CIRCLE_TOL))
        });
        group.bench_with_input(BenchmarkId::new("triangles", n), &xy, |b, xy| {
            b.iter(|| triangles::hashes(xy, triangles::DEFAULT_MIN_ANGLE))
        });
    }
    group.finish();
}

fn bench_find_transform(c: &mut Criterion) {
    let m0 = transform_matrix(8.0, std::f64::consts::PI, Vector2::new(0.3, 0.1));
    let (source, target) = disturbed_pair(
        FieldCfg {
            points: 15,
            extras: 5,
            jitter: 0.0,
        },
        &m0,
        43,
    );
    let cfg = MatchCfg {
        tolerance: 0.01,
        ..MatchCfg::default()
    };
    c.bench_function("find_transform_15", |b| {
        b.iter(|| find_transform(&source, &target, &cfg))
    });
}

criterion_group!(benches, bench_hashes, bench_find_transform);
criterion_main!(benches);
