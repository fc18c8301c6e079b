use anyhow::Context;
use hopfield_core::config::ConfigError;
use hopfield_core::logging;
use hopfield_core::{
    hamming_distance, HopfieldNetwork, NetworkConfig, RecallOptions, UpdateMode,
};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const RANDOM_SEED: u64 = 42;
const NOISE_FRACTION: f64 = 0.15;

fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    println!(
        "Loaded config: {}x{} neurons={} max_iterations={} threshold={}",
        config.width,
        config.height,
        config.n_neurons(),
        config.max_iterations,
        config.convergence_threshold
    );

    let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
    let n = config.n_neurons();
    let patterns = Array2::from_shape_fn((config.default_patterns, n), |_| {
        if rng.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    });

    let mut network = HopfieldNetwork::with_config(&config)?;
    network.train(&patterns)?;
    let info = network.training_info();
    logging::log_training(&config.logging.directory, &info)
        .context("failed to write training log")?;
    println!(
        "Trained {} patterns (capacity {:.1}, usage {:.3})",
        info.n_patterns_trained, info.capacity, info.usage_ratio
    );

    let flips = ((n as f64) * NOISE_FRACTION).round() as usize;
    for (index, stored) in patterns.outer_iter().enumerate() {
        let mut probe: Array1<f64> = stored.to_owned();
        for position in sample(&mut rng, n, flips) {
            probe[position] = -probe[position];
        }

        for mode in [UpdateMode::Asynchronous, UpdateMode::Synchronous] {
            let options = RecallOptions {
                mode,
                ..RecallOptions::default()
            };
            let outcome = network.recall(probe.view(), options)?;
            let remaining = hamming_distance(outcome.state.view(), stored)?;
            let flipped = hamming_distance(outcome.state.view(), probe.view())?;

            logging::log_recall(
                &config.logging.directory,
                &format!("pattern_{index}"),
                &outcome.summary(),
                flipped,
            )
            .context("failed to write recall log")?;

            println!(
                "pattern {index} [{mode}]: {flips} -> {remaining} wrong bits, {} sweeps, converged={}, energy {:.2} -> {:.2}",
                outcome.iterations, outcome.converged, outcome.initial_energy, outcome.energy
            );
        }
    }

    println!("{network}");
    Ok(())
}

fn load_config() -> Result<NetworkConfig, ConfigError> {
    NetworkConfig::load_from_file("config/network.toml").or_else(|err| {
        eprintln!("Falling back to default config: {err}");
        Ok(NetworkConfig::default())
    })
}
