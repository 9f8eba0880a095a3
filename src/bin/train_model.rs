use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tee2like::config;
use tee2like::training::{self, ArtifactPaths, TrainConfig};

/// Train the liked/not-liked classifier and write its artifacts.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Cleaned or synthetic CSV with at least `price`, `color` and `liked`
    #[arg(long, env = "TEE2LIKE_TRAIN_DATA", default_value = config::SYNTHETIC_DATA_PATH)]
    data: PathBuf,

    #[arg(long, env = "TEE2LIKE_MODEL", default_value = config::MODEL_PATH)]
    model: PathBuf,

    #[arg(long, env = "TEE2LIKE_ENCODER", default_value = config::ENCODER_PATH)]
    encoder: PathBuf,

    #[arg(long, env = "TEE2LIKE_METRICS", default_value = config::METRICS_PATH)]
    metrics: PathBuf,

    #[arg(long, default_value_t = config::SPLIT_SEED)]
    seed: u64,

    #[arg(long, default_value_t = config::TEST_RATIO)]
    test_ratio: f64,
}

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let args = Args::parse();

    let paths = ArtifactPaths {
        model: args.model,
        encoder: args.encoder,
        metrics: args.metrics,
    };
    let train_config = TrainConfig {
        test_ratio: args.test_ratio,
        seed: args.seed,
    };

    println!("🧠 Training model on {}...", args.data.display());
    let trained = training::run(&args.data, &paths, &train_config)
        .with_context(|| format!("❌ training on {} failed", args.data.display()))?;

    println!("✔ Model Accuracy: {:.2}", trained.report.accuracy);
    let (intercept, weights) = trained.model.coefficients();
    for (feature, weight) in &weights {
        println!("{feature:>12}: {weight:+.5}");
    }
    println!("{:>12}: {intercept:+.5}", "intercept");
    println!("💾 Model saved to {}", paths.model.display());
    println!("\nSUCCESS! Artifacts are ready for prediction.");
    Ok(())
}
