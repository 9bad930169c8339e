//! Benchmarks for series tessellation.
//!
//! Measures:
//! - Thin and thick line tessellation
//! - Area fills with frequent baseline crossings
//! - Circle point tessellation and ring edges
//! - Cached redraws through a series

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec2;
use glseries::{
    AreaSample, AreaTessellator, LineSeries, LineTessellator, Orientation, PointSample,
    PointTessellator, Symbol, XyConfig, point::edge_buffer,
};
use glseries_core::{LinearScale, PixelScale, TessellationConfig};
use glseries_test_utils::MockRasterizer;

const PIXEL: PixelScale = PixelScale::new(0.0025, 0.0033);

fn wave(len: usize) -> Vec<Vec2> {
    (0..len)
        .map(|i| {
            let t = i as f32 / len as f32;
            Vec2::new(t * 2.0 - 1.0, (t * 40.0).sin() * 0.8)
        })
        .collect()
}

fn bench_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");
    let config = TessellationConfig::default();

    for size in [1_000, 10_000, 100_000] {
        let points: Vec<Option<Vec2>> = wave(size).into_iter().map(Some).collect();
        group.throughput(Throughput::Elements(size as u64));

        for width in [1.0, 3.0] {
            let tessellator = LineTessellator::new(width, &config);
            group.bench_with_input(
                BenchmarkId::new(format!("width_{width}"), size),
                &points,
                |b, points| b.iter(|| tessellator.tessellate(black_box(points), PIXEL)),
            );
        }
    }

    group.finish();
}

fn bench_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("area");
    let tessellator =
        AreaTessellator::new(Orientation::Vertical, 1.0, &TessellationConfig::default());

    for size in [1_000, 10_000, 100_000] {
        let samples: Vec<Option<AreaSample>> = wave(size)
            .into_iter()
            .map(|p| Some(AreaSample::new(p, Vec2::new(p.x, 0.0))))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| tessellator.tessellate_fill(black_box(samples)))
        });
    }

    group.finish();
}

fn bench_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("points");
    let tessellator = PointTessellator::new(&Symbol::Circle, &TessellationConfig::default());

    for size in [1_000, 10_000] {
        let samples: Vec<PointSample> = wave(size)
            .into_iter()
            .map(|p| PointSample::new(p, 64.0))
            .collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("fill", size), &samples, |b, samples| {
            b.iter(|| tessellator.tessellate(black_box(samples), PIXEL))
        });

        let fill = tessellator.tessellate(&samples, PIXEL).unwrap();
        group.bench_with_input(BenchmarkId::new("edges", size), &fill, |b, fill| {
            b.iter(|| edge_buffer(black_box(fill), PIXEL, 1.0))
        });
    }

    group.finish();
}

fn bench_cached_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_redraw");
    let scale = LinearScale::new((-1.0, 1.0), (0.0, 800.0));

    for size in [10_000, 100_000] {
        let data = wave(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let mut mock = MockRasterizer::new();
            let config = XyConfig::<Vec2>::default()
                .with_tessellation(TessellationConfig::default().with_cache(true));
            let mut series = LineSeries::new(config);
            b.iter(|| {
                mock.clear_calls();
                series.draw(black_box(data), &scale, &scale, &mut mock)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_line,
    bench_area,
    bench_points,
    bench_cached_redraw
);
criterion_main!(benches);
