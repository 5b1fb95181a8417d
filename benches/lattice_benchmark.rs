#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for plot resolution and lattice layout.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trueno_lattice::lattice::{layout, GridOverride};
use trueno_lattice::prelude::*;
use trueno_lattice::render::BasicMarks;

fn scatter_points(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, (i as f64 * 0.37).sin() * 100.0)).collect()
}

fn stacked_points(categories: usize, series: &[SeriesSpec]) -> Vec<Point> {
    (0..categories)
        .flat_map(|c| series.iter().enumerate().map(move |(i, s)| Point::new(format!("c{c}"), (c + i) as f64).series(s.name.clone())))
        .collect()
}

fn resolve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for size in [100, 1_000, 10_000] {
        let data = scatter_points(size);
        group.bench_with_input(BenchmarkId::new("scatter", size), &data, |b, data| {
            b.iter(|| Plot::new(black_box(data.clone()), PlotType::Scatter, "bench").resolve().expect("resolve should succeed"));
        });
    }

    let series: Vec<SeriesSpec> = (0..8).map(|i| SeriesSpec::new(format!("s{i}"), Rgba::BLACK)).collect();
    for categories in [10, 100, 500] {
        let data = stacked_points(categories, &series);
        let config = PlotConfig::default().series(series.clone());
        group.bench_with_input(BenchmarkId::new("stacked_column", categories), &data, |b, data| {
            b.iter(|| {
                Plot::new(black_box(data.clone()), PlotType::StackedColumn, "bench")
                    .config(config.clone())
                    .resolve()
                    .expect("resolve should succeed")
            });
        });
    }

    group.finish();
}

fn layout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice");

    for side in [2, 8, 32] {
        let positions: Vec<(usize, usize)> = (0..side).flat_map(|r| (0..side).map(move |c| (r, c))).collect();
        group.bench_with_input(BenchmarkId::new("layout", format!("{side}x{side}")), &positions, |b, positions| {
            b.iter(|| layout(black_box(positions), &GridOverride::default(), 1000.0, 600.0).expect("layout should succeed"));
        });
    }

    for side in [2, 4, 8] {
        let cells: Vec<CellSpec> = (0..side)
            .flat_map(|r| (0..side).map(move |c| CellSpec::new(r, c, scatter_points(50), PlotType::Scatter)))
            .collect();
        group.bench_with_input(BenchmarkId::new("render", format!("{side}x{side}")), &cells, |b, cells| {
            b.iter(|| {
                let lattice = Lattice::new(black_box(cells.clone()), "bench", LatticeConfig::default())
                    .expect("lattice should build");
                lattice.render(&BasicMarks::default()).expect("render should succeed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, resolve_benchmark, layout_benchmark);
criterion_main!(benches);
