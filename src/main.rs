use std::io;
use std::path::PathBuf;

use clap::Parser;
use tee2like::predictor::run_session;
use tee2like::{Predictor, config};

/// Ask the model whether kids will like a T-shirt.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "TEE2LIKE_MODEL", default_value = config::MODEL_PATH)]
    model: PathBuf,

    #[arg(long, env = "TEE2LIKE_ENCODER", default_value = config::ENCODER_PATH)]
    encoder: PathBuf,
}

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let args = Args::parse();

    println!("\n--- 🛍️  Myntra Junior AI Helper  ---");

    let predictor = match Predictor::load(&args.model, &args.encoder) {
        Ok(p) => p,
        Err(e) => {
            println!("❌ Error: {e}. Train the model first (run `train_model`).");
            return Ok(());
        }
    };
    println!("AI Loaded successfully! Ask me about a T-shirt.\n");

    let stdin = io::stdin();
    let made = run_session(&predictor, stdin.lock(), io::stdout())?;
    tracing::info!(predictions = made, "session finished");
    Ok(())
}
