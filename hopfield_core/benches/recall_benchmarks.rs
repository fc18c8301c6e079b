//! Performance benchmarks for training and recall
//!
//! Run with: cargo bench --bench recall_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hopfield_core::{HopfieldNetwork, NetworkConfig, RecallOptions};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_patterns(rng: &mut StdRng, p: usize, n: usize) -> Array2<f64> {
    Array2::from_shape_fn((p, n), |_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
}

fn corrupted_probe(rng: &mut StdRng, pattern: &Array1<f64>, noise: f64) -> Array1<f64> {
    pattern.mapv(|v| if rng.gen_bool(noise) { -v } else { v })
}

/// Benchmark Hebbian training at increasing neuron counts
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("hebbian_training");
    let mut rng = StdRng::seed_from_u64(42);

    for side in [8usize, 16, 32].iter() {
        let n = side * side;
        let patterns = random_patterns(&mut rng, 4, n);
        let mut network = HopfieldNetwork::new(*side, *side).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &patterns, |b, patterns| {
            b.iter(|| {
                network.train(black_box(patterns)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark asynchronous vs synchronous recall on a 44x60 glyph-sized network
fn bench_recall_modes(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let config = NetworkConfig::default();
    let mut network = HopfieldNetwork::with_config(&config).unwrap();
    let patterns = random_patterns(&mut rng, config.default_patterns, config.n_neurons());
    network.train(&patterns).unwrap();
    let probe = corrupted_probe(&mut rng, &patterns.row(0).to_owned(), 0.1);

    let mut group = c.benchmark_group("recall_mode");
    group.sample_size(20);

    group.bench_function("asynchronous", |b| {
        b.iter(|| {
            black_box(
                network
                    .recall(probe.view(), RecallOptions::asynchronous())
                    .unwrap(),
            );
        });
    });

    group.bench_function("synchronous", |b| {
        b.iter(|| {
            black_box(
                network
                    .recall(probe.view(), RecallOptions::synchronous())
                    .unwrap(),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_training, bench_recall_modes);
criterion_main!(benches);
