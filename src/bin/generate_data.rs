use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tee2like::config;
use tee2like::synthetic::{self, label_counts};

/// Generate a synthetic kids' T-shirt catalog with a hidden "liked" rule.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "TEE2LIKE_SAMPLES", default_value_t = config::NUM_SAMPLES)]
    samples: usize,

    #[arg(long, env = "TEE2LIKE_SEED", default_value_t = config::GENERATOR_SEED)]
    seed: u64,

    #[arg(long, env = "TEE2LIKE_SYNTHETIC_DATA", default_value = config::SYNTHETIC_DATA_PATH)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let args = Args::parse();

    println!(
        "Generating {} rows of synthetic data for Myntra Junior...",
        args.samples
    );
    let rows = synthetic::generate(args.samples, args.seed);

    let (not_liked, liked) = label_counts(&rows);
    println!("\nData Distribution:");
    println!("liked=1: {liked}");
    println!("liked=0: {not_liked}");

    println!("\nFirst 5 rows:");
    println!(
        "{:>10}  {:<14} {:>5}  {:<10} {:>5}",
        "product_id", "brand", "price", "color", "liked"
    );
    for r in rows.iter().take(5) {
        println!(
            "{:>10}  {:<14} {:>5}  {:<10} {:>5}",
            r.product_id, r.brand, r.price, r.color, r.liked
        );
    }

    synthetic::save_csv(&rows, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "\n✔ Success! Synthetic data saved to: {}",
        args.output.display()
    );
    Ok(())
}
