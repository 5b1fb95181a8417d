#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for shared sample ordering.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use std::hint::black_box;
use trueno_lattice::comut::{sort_samples, DataDocument, Direction, OrderingState, SortKey};
use trueno_lattice::Value;

fn document(samples: usize, genes: usize) -> DataDocument {
    let names: Vec<String> = (0..samples).map(|i| format!("S{i}")).collect();
    let sets: Vec<String> = (0..genes).map(|g| format!("gene{g}")).collect();
    let data = names
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let record = sets
                .iter()
                .enumerate()
                .map(|(g, set)| {
                    let v = (i * 31 + g * 17) % 7;
                    (set.clone(), (v > 2).then(|| Value::from(v)))
                })
                .collect::<HashMap<_, _>>();
            (s.clone(), record)
        })
        .collect();
    DataDocument { samples: names, sets, data }
}

fn sort_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_samples");

    for samples in [100, 1_000, 5_000] {
        let doc = document(samples, 20);
        let keys: Vec<SortKey> = (0..5).map(|g| SortKey::new(format!("gene{g}"), Direction::Desc)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(samples), &doc, |b, doc| {
            b.iter(|| sort_samples(doc.samples(), black_box(&keys), doc));
        });
    }

    group.finish();
}

fn recompute_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");

    for samples in [100, 1_000] {
        let doc = document(samples, 20);
        let mut state = OrderingState::new(doc.samples().map(String::from).collect());
        group.bench_with_input(BenchmarkId::new("click", samples), &doc, |b, doc| {
            b.iter(|| {
                state.click(black_box("gene3"), false);
                state.recompute(doc);
                state.order().len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, sort_benchmark, recompute_benchmark);
criterion_main!(benches);
