use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tee2like::{cleaning, config};

/// Clean a raw fashion catalog down to labelled kids' T-shirt rows.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "TEE2LIKE_RAW_DATA", default_value = config::RAW_DATA_PATH)]
    input: PathBuf,

    #[arg(long, env = "TEE2LIKE_CLEAN_DATA", default_value = config::CLEAN_DATA_PATH)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let args = Args::parse();

    println!("Loading data from {}...", args.input.display());
    let outcome = cleaning::run(&args.input, &args.output)
        .with_context(|| format!("❌ cleaning {} failed", args.input.display()))?;

    for stage in &outcome.stages {
        if stage.applied {
            println!(
                "   -> Found {} {} items. Keeping them.",
                stage.matched, stage.label
            );
        } else {
            println!(
                "   ⚠ Warning: Only found {} {} items. Using the unfiltered rows instead.",
                stage.matched, stage.label
            );
        }
    }
    println!(
        "✔ Cleaning complete. {} of {} rows kept.",
        outcome.rows.len(),
        outcome.input_rows
    );
    println!("✔ File saved successfully at: {}", args.output.display());
    Ok(())
}
