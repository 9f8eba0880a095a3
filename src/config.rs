//! Fixed pipeline configuration.
//!
//! Every stage reads its defaults from here; the binaries only let flags or
//! environment variables override them.

/// Raw catalog consumed by the cleaner.
pub const RAW_DATA_PATH: &str = "data/raw/myntra_fashion_products.csv";
/// Output of the cleaner.
pub const CLEAN_DATA_PATH: &str = "data/processed/myntra_junior_clean.csv";
/// Output of the synthetic generator, and the trainer's default input.
pub const SYNTHETIC_DATA_PATH: &str = "data/processed/myntra_junior_synthetic.csv";

pub const MODEL_PATH: &str = "models/myntra_model.msgpack";
pub const ENCODER_PATH: &str = "models/color_encoder.msgpack";
pub const METRICS_PATH: &str = "models/metrics.txt";

pub const NUM_SAMPLES: usize = 5000;
pub const GENERATOR_SEED: u64 = 42;

pub const SPLIT_SEED: u64 = 42;
pub const TEST_RATIO: f64 = 0.2;

/// Ratings strictly above this are "liked".
pub const RATING_THRESHOLD: f64 = 4.1;

pub const KIDS_KEYWORDS: &[&str] = &["Boy", "Girl", "Kid", "Junior"];
pub const KIDS_MIN_ROWS: usize = 100;
pub const TSHIRT_KEYWORDS: &[&str] = &["T-shirt"];
pub const TSHIRT_MIN_ROWS: usize = 50;

pub const WEB_HOST: &str = "127.0.0.1";
pub const WEB_PORT: u16 = 8501;

/// Default log filter when `RUST_LOG` is unset.
pub const LOG_FILTER: &str = "tee2like=info,tower_http=info";

/// Installs the global `tracing` subscriber used by every binary. Logs go to
/// stderr so they never interleave with prompts and verdicts on stdout.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| LOG_FILTER.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
