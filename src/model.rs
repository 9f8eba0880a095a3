use std::path::Path;

use linfa::prelude::*;
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2, Axis, array};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact;
use crate::encoder::ColorEncoder;
use crate::error::{Error, Result};

/// Feature columns, in the order the model expects them.
pub const FEATURES: [&str; 2] = ["price", "color_code"];

/// Probabilities above this are classified as liked.
pub const DECISION_THRESHOLD: f64 = 0.5;

const MAX_ITERATIONS: u64 = 200;

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Binary logistic classifier over `[price, color_code]`.
///
/// Inputs are standardised with the training mean and deviation before the
/// linear term. Weights are stored so that the sigmoid always yields
/// P(liked), whichever class the optimiser treated as positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeModel {
    intercept: f64,
    weights: Array1<f64>,
    mean: Array1<f64>,
    scale: Array1<f64>,
    colors: Vec<String>,
    #[serde(default)]
    accuracy: Option<f64>,
}

impl LikeModel {
    /// Fits on `x` (`n x 2`, columns as in [`FEATURES`]) and 0/1 labels `y`.
    pub fn fit(x: &Array2<f64>, y: &Array1<u8>, encoder: &ColorEncoder) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        let liked = y.iter().filter(|&&v| v == 1).count();
        if liked == 0 {
            return Err(Error::DegenerateTarget(0));
        }
        if liked == y.len() {
            return Err(Error::DegenerateTarget(1));
        }

        let mean = x.mean_axis(Axis(0)).ok_or(Error::EmptyDataset)?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });
        let standardized = (x - &mean) / &scale;

        let dataset = Dataset::new(standardized, y.clone());
        let fitted = LogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&dataset)
            .map_err(|e| Error::Fit(e.to_string()))?;

        let mut intercept = fitted.intercept();
        let mut weights = fitted.params().clone();
        if fitted.labels().pos.class != 1 {
            intercept = -intercept;
            weights.mapv_inplace(|w| -w);
        }
        debug!(intercept, weights = ?weights, "logistic fit finished");

        Ok(LikeModel {
            intercept,
            weights,
            mean,
            scale,
            colors: encoder.classes().to_vec(),
            accuracy: None,
        })
    }

    /// P(liked) for every row of `x`.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Array1<f64> {
        let standardized = (x - &self.mean) / &self.scale;
        (standardized.dot(&self.weights) + self.intercept).mapv(sigmoid)
    }

    /// 0/1 class for every row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<u8> {
        self.predict_proba(x)
            .mapv(|p| u8::from(p > DECISION_THRESHOLD))
    }

    /// Class and P(liked) for a single item.
    pub fn predict_one(&self, price: f64, color_code: usize) -> (u8, f64) {
        let x = array![[price, color_code as f64]];
        let p = self.predict_proba(&x)[0];
        (u8::from(p > DECISION_THRESHOLD), p)
    }

    /// Intercept and per-feature weights expressed on the raw (unscaled) inputs.
    pub fn coefficients(&self) -> (f64, Vec<(&'static str, f64)>) {
        let raw = &self.weights / &self.scale;
        let intercept = self.intercept - raw.dot(&self.mean);
        let named = FEATURES.iter().copied().zip(raw.iter().copied()).collect();
        (intercept, named)
    }

    /// Whether `encoder` is the one this model's color codes refer to.
    pub fn is_paired_with(&self, encoder: &ColorEncoder) -> bool {
        self.colors.as_slice() == encoder.classes()
    }

    /// Records the held-out accuracy measured after fitting.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Held-out accuracy, if the trainer recorded one.
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Saves the model to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        artifact::save_to_file(self, path)
    }

    /// Loads a model saved by [`LikeModel::save_to_file`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        artifact::load_from_file(path)
    }
}
