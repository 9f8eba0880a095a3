use std::path::PathBuf;

use clap::Parser;
use tee2like::config;
use tee2like::web::{self, ServerConfig};

/// Serve the prediction form.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "TEE2LIKE_HOST", default_value = config::WEB_HOST)]
    host: String,

    #[arg(long, env = "TEE2LIKE_PORT", default_value_t = config::WEB_PORT)]
    port: u16,

    #[arg(long, env = "TEE2LIKE_MODEL", default_value = config::MODEL_PATH)]
    model: PathBuf,

    #[arg(long, env = "TEE2LIKE_ENCODER", default_value = config::ENCODER_PATH)]
    encoder: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_logging();
    let args = Args::parse();

    web::run_server(ServerConfig {
        host: args.host,
        port: args.port,
        model_path: args.model,
        encoder_path: args.encoder,
    })
    .await
}
