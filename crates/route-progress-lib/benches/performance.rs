//! Performance benchmarks for route-progress-lib
//!
//! Run with: cargo bench --package route-progress-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use route_progress_lib::{
    Config, Coordinate, DistanceFunction, EllipsoidalDistance, Metric, Path, PlanarDistance,
    Segment,
};
use std::hint::black_box;

/// Generate a realistic wiggly polyline with the specified number of points.
fn generate_polyline(num_points: usize, base_lat: f64, base_lon: f64) -> Vec<Coordinate> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            let lat = base_lat + t * 0.1 + (t * 50.0).sin() * 0.001;
            let lon = base_lon + t * 0.1 + (t * 30.0).cos() * 0.001;
            Coordinate::new(lat, lon)
        })
        .collect()
}

/// Generate a contiguous path of `num_segments` segments
fn generate_path<D: DistanceFunction>(
    num_segments: usize,
    points_per_segment: usize,
    distance_fn: &D,
) -> Path {
    let mut segments = Vec::with_capacity(num_segments);
    let mut start = Coordinate::new(51.5, -0.1);
    for i in 0..num_segments {
        let coordinates = generate_polyline(points_per_segment, start.latitude, start.longitude);
        start = coordinates[coordinates.len() - 1];
        segments.push(
            Segment::new(
                format!("seg-{i}"),
                format!("stop-{i}"),
                format!("stop-{}", i + 1),
                coordinates,
                distance_fn,
            )
            .unwrap(),
        );
    }
    Path::with_config("bench", segments, distance_fn, &Config::default()).unwrap()
}

/// Evenly spaced progress samples covering the whole path
fn progress_series(path: &Path, samples: usize) -> Vec<f64> {
    let total = path.total_distance();
    (0..samples)
        .map(|i| total * i as f64 / (samples - 1) as f64)
        .collect()
}

// ============================================================================
// Core Benchmarks - Key performance indicators
// ============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.sample_size(20);

    let coordinates = generate_polyline(50_000, 51.5, -0.1);
    group.throughput(Throughput::Elements(coordinates.len() as u64));

    for metric in [Metric::Planar, Metric::Ellipsoidal, Metric::Haversine] {
        group.bench_with_input(
            BenchmarkId::new("segment_50k", metric),
            &metric,
            |b, metric| {
                b.iter(|| {
                    Segment::new("s", "a", "b", coordinates.clone(), metric).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("position");

    // 100 segments with 1000 points each - representative route
    let path = generate_path(100, 1_000, &EllipsoidalDistance);
    let total = path.total_distance();

    group.bench_function("path_100x1k_middle", |b| {
        b.iter(|| path.position(black_box(total * 0.5)).unwrap());
    });

    group.bench_function("path_100x1k_ratio", |b| {
        b.iter(|| path.position_from_ratio(black_box(0.731)).unwrap());
    });

    let segment = &path.segments()[0];
    let segment_total = segment.total_distance();
    group.bench_function("segment_1k", |b| {
        b.iter(|| segment.position(black_box(segment_total * 0.37)).unwrap());
    });

    group.finish();
}

fn bench_chain_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_state");
    group.sample_size(20);

    let path = generate_path(100, 1_000, &PlanarDistance);

    for samples in [1_000usize, 100_000] {
        let series = progress_series(&path, samples);
        group.throughput(Throughput::Elements(samples as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", samples),
            &series,
            |b, series| {
                b.iter(|| path.chain_state(series).unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", samples),
            &series,
            |b, series| {
                b.iter(|| path.par_chain_state(series).unwrap());
            },
        );
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_construction,
    bench_position,
    bench_chain_state,
);

criterion_main!(benches);
