use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::{Error, Result};

/// Maps color names to dense integer codes and back.
///
/// Codes follow the sorted order of the colors seen at fit time, so the code
/// space is always `0..classes().len()`. Colors outside that vocabulary are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEncoder {
    classes: Vec<String>,
}

impl ColorEncoder {
    /// Fits the encoder on every distinct color in `colors`.
    pub fn fit<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> =
            colors.into_iter().map(|c| c.as_ref().to_string()).collect();
        if classes.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok(ColorEncoder {
            classes: classes.into_iter().collect(),
        })
    }

    /// Code of `color`; colors outside the vocabulary are an `UnknownColor` error.
    pub fn encode(&self, color: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(color))
            .map_err(|_| Error::UnknownColor {
                color: color.to_string(),
                known: self.classes.clone(),
            })
    }

    /// Color name for `code`.
    pub fn decode(&self, code: usize) -> Result<&str> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(Error::UnknownCode(code))
    }

    /// The fitted vocabulary, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Saves the encoder to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        artifact::save_to_file(self, path)
    }

    /// Loads an encoder saved by [`ColorEncoder::save_to_file`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        artifact::load_from_file(path)
    }
}
