use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between a raw CSV and a verdict.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown color '{color}', known colors: {}", known.join(", "))]
    UnknownColor { color: String, known: Vec<String> },

    #[error("color code {0} is outside the fitted vocabulary")]
    UnknownCode(usize),

    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("artifact not found: {0}")]
    MissingArtifact(PathBuf),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("dataset is empty after cleaning")]
    EmptyDataset,

    #[error("target column only contains class {0}, cannot fit a binary classifier")]
    DegenerateTarget(u8),

    #[error("invalid label {0} in row {1}, expected 0 or 1")]
    InvalidLabel(u8, usize),

    #[error("invalid price '{0}'")]
    InvalidPrice(String),

    #[error("price must be between {min} and {max}, got {price}")]
    PriceOutOfRange { price: f64, min: f64, max: f64 },

    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("model was trained against a different color encoder")]
    ArtifactMismatch,

    #[error("model fit failed: {0}")]
    Fit(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode artifact: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("failed to decode artifact: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl Error {
    /// Errors a user can fix by re-entering input. The CLI loop and the web
    /// form show these verbatim; anything else gets a generic message.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnknownColor { .. }
                | Error::InvalidPrice(_)
                | Error::PriceOutOfRange { .. }
                | Error::MissingField(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
