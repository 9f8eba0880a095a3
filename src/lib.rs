//! # tee2like 👕
//!
//! Predict whether a kids' T-shirt will be liked from its price and color,
//! using a logistic-regression classifier.
//!
//! The crate is a small batch pipeline plus two front ends:
//!
//! 1. [`synthetic`] generates a seeded catalog with a hidden preference rule,
//!    or [`cleaning`] turns a raw fashion catalog into labelled rows;
//! 2. [`training`] fits a [`ColorEncoder`] and a [`LikeModel`] and writes them,
//!    plus a metrics report, as artifacts;
//! 3. [`Predictor`] loads the pair back for the interactive command-line loop
//!    ([`predictor::run_session`]) and the [`web`] form.
//!
//! ## Features
//! - [`linfa-logistic`](https://crates.io/crates/linfa-logistic) binary classifier
//! - Typed errors for unknown colors instead of silent fallbacks
//! - Model persistence with `rmp-serde` (MessagePack)
//! - Reproducible data generation and train/test splits from fixed seeds
//!
//! ## Example
//! ```rust,no_run
//! use std::path::Path;
//! use tee2like::Predictor;
//!
//! let predictor = Predictor::load(
//!     Path::new("models/myntra_model.msgpack"),
//!     Path::new("models/color_encoder.msgpack"),
//! )?;
//! let prediction = predictor.predict(300.0, "Red")?;
//! println!("liked: {}, confidence: {:.0}%", prediction.liked, prediction.confidence() * 100.0);
//! # Ok::<(), tee2like::Error>(())
//! ```

pub mod artifact;
pub mod cleaning;
pub mod config;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod synthetic;
pub mod training;
pub mod web;

pub use encoder::ColorEncoder;
pub use error::{Error, Result};
pub use metrics::ClassificationReport;
pub use model::LikeModel;
pub use predictor::{Prediction, Predictor};
