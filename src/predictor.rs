//! Loaded model/encoder pair and the interactive prediction loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, error, info};

use crate::encoder::ColorEncoder;
use crate::error::{Error, Result};
use crate::model::LikeModel;

/// A model together with the encoder it was trained against.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: LikeModel,
    encoder: ColorEncoder,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub liked: bool,
    /// P(liked) as reported by the model.
    pub liked_probability: f64,
}

impl Prediction {
    /// Probability of the predicted class.
    pub fn confidence(&self) -> f64 {
        if self.liked {
            self.liked_probability
        } else {
            1.0 - self.liked_probability
        }
    }

    /// Predicted class as the 0/1 label used in the data.
    pub fn class(&self) -> u8 {
        u8::from(self.liked)
    }
}

/// Parses a user-typed price; only finite numbers are accepted.
pub fn parse_price(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| Error::InvalidPrice(input.trim().to_string()))
}

impl Predictor {
    /// Pairs a model with its encoder; a foreign encoder is an `ArtifactMismatch`.
    pub fn new(model: LikeModel, encoder: ColorEncoder) -> Result<Self> {
        if !model.is_paired_with(&encoder) {
            return Err(Error::ArtifactMismatch);
        }
        Ok(Predictor { model, encoder })
    }

    /// Loads both artifacts; either one missing is an error.
    pub fn load(model_path: &Path, encoder_path: &Path) -> Result<Self> {
        let model = LikeModel::load_from_file(model_path)?;
        let encoder = ColorEncoder::load_from_file(encoder_path)?;
        let predictor = Predictor::new(model, encoder)?;
        info!(
            model = %model_path.display(),
            colors = predictor.encoder.classes().len(),
            "predictor loaded"
        );
        Ok(predictor)
    }

    /// Verdict for one item. An unknown color is a recoverable error.
    pub fn predict(&self, price: f64, color: &str) -> Result<Prediction> {
        let code = self.encoder.encode(color)?;
        let (class, liked_probability) = self.model.predict_one(price, code);
        debug!(price, color, class, liked_probability, "prediction");
        Ok(Prediction {
            liked: class == 1,
            liked_probability,
        })
    }

    /// Colors the encoder can encode, in code order.
    pub fn known_colors(&self) -> &[String] {
        self.encoder.classes()
    }

    /// The underlying fitted model.
    pub fn model(&self) -> &LikeModel {
        &self.model
    }
}

/// One line of verdict text, as printed by the command-line loop.
pub fn verdict_line(prediction: &Prediction) -> String {
    let confidence = prediction.confidence() * 100.0;
    if prediction.liked {
        format!("✅ SUCCESS! The kid will LIKE this t-shirt! (Confidence: {confidence:.0}%)")
    } else {
        format!("❌ PASS. The kid will NOT like this. (Confidence: {confidence:.0}%)")
    }
}

const COLOR_PROMPT: &str = "Enter Color (Red, Blue, Black, etc.): ";

#[derive(Debug, Clone, PartialEq)]
enum State {
    AwaitingInput,
    Predicting { price: f64, color: String },
    Done,
}

/// Reads one trimmed line; `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Runs the read-predict loop until the user stops or input ends.
///
/// Returns how many predictions were made. Bad prices and unknown colors are
/// reported and re-prompted. Other failures get a generic message and the
/// loop carries on; only I/O failures end the session early.
pub fn run_session<R: BufRead, W: Write>(
    predictor: &Predictor,
    mut input: R,
    mut output: W,
) -> io::Result<usize> {
    let mut state = State::AwaitingInput;
    let mut made = 0;

    loop {
        state = match state {
            State::Done => return Ok(made),
            State::AwaitingInput => {
                writeln!(output, "{}", "-".repeat(30))?;
                match prompt(&mut input, &mut output, "Enter Price (e.g., 500): ")? {
                    None => State::Done,
                    Some(raw) if raw.eq_ignore_ascii_case("exit") => State::Done,
                    Some(raw) => match parse_price(&raw) {
                        Err(_) => {
                            writeln!(output, "Please enter a valid number for price!")?;
                            State::AwaitingInput
                        }
                        Ok(price) => match prompt(&mut input, &mut output, COLOR_PROMPT)? {
                            None => State::Done,
                            Some(color) => State::Predicting { price, color },
                        },
                    },
                }
            }
            State::Predicting { price, color } => match predictor.predict(price, &color) {
                Err(Error::UnknownColor { color, known }) => {
                    writeln!(
                        output,
                        "⚠ Oops! I haven't learned about the color '{color}' yet."
                    )?;
                    writeln!(output, "Try: {}", known.join(", "))?;
                    State::AwaitingInput
                }
                Err(e) if e.is_recoverable() => {
                    writeln!(output, "⚠ {e}")?;
                    State::AwaitingInput
                }
                Err(e) => {
                    error!(error = %e, price, color = %color, "prediction failed");
                    writeln!(output, "❌ Something went wrong. Please try again.")?;
                    State::AwaitingInput
                }
                Ok(prediction) => {
                    made += 1;
                    writeln!(output, "\n{}", verdict_line(&prediction))?;
                    match prompt(&mut input, &mut output, "\nCheck another item? (y/n): ")? {
                        Some(again) if again.eq_ignore_ascii_case("y") => State::AwaitingInput,
                        _ => State::Done,
                    }
                }
            },
        };
    }
}
