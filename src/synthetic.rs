//! Seeded synthetic catalog with a hidden "what kids like" rule.

use std::io::Write;
use std::ops::Range;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact;
use crate::error::{Error, Result};

pub const BRANDS: [&str; 6] = [
    "H&M Kids",
    "Max",
    "Pantaloons Jr",
    "Gap Kids",
    "Mothercare",
    "Zara Kids",
];

pub const COLORS: [&str; 10] = [
    "Black",
    "White",
    "Navy Blue",
    "Red",
    "Pink",
    "Yellow",
    "Orange",
    "Green",
    "Purple",
    "Blue",
];

pub const BRIGHT_COLORS: [&str; 5] = ["Red", "Pink", "Yellow", "Orange", "Purple"];
pub const DULL_COLORS: [&str; 2] = ["Black", "Navy Blue"];

pub const PRICE_RANGE: Range<u32> = 199..1500;

/// Noisy scores strictly above this are labelled liked.
pub const LIKE_THRESHOLD: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticRow {
    pub product_id: u32,
    pub brand: String,
    pub price: u32,
    pub color: String,
    pub liked: u8,
}

/// Deterministic part of the label rule: cheap and bright wins.
pub fn preference_score(price: u32, color: &str) -> i32 {
    let price_score = if price < 600 {
        3
    } else if price < 900 {
        1
    } else {
        -2
    };
    let color_score = if BRIGHT_COLORS.contains(&color) {
        3
    } else if DULL_COLORS.contains(&color) {
        -1
    } else {
        0
    };
    price_score + color_score
}

/// Liked when the score plus `noise` clears [`LIKE_THRESHOLD`].
pub fn label(price: u32, color: &str, noise: f64) -> u8 {
    u8::from(f64::from(preference_score(price, color)) + noise > LIKE_THRESHOLD)
}

/// Generates `n` rows from a single stream seeded with `seed`.
///
/// Columns are drawn one after another (colors, prices, brands) before the
/// per-row noise, so the output for a given seed never depends on how the rows
/// are consumed.
pub fn generate(n: usize, seed: u64) -> Vec<SyntheticRow> {
    let mut rng = StdRng::seed_from_u64(seed);

    let colors: Vec<&str> = (0..n)
        .map(|_| COLORS[rng.random_range(0..COLORS.len())])
        .collect();
    let prices: Vec<u32> = (0..n).map(|_| rng.random_range(PRICE_RANGE)).collect();
    let brands: Vec<&str> = (0..n)
        .map(|_| BRANDS[rng.random_range(0..BRANDS.len())])
        .collect();

    let rows: Vec<SyntheticRow> = colors
        .into_iter()
        .zip(prices)
        .zip(brands)
        .enumerate()
        .map(|(i, ((color, price), brand))| {
            let noise: f64 = rng.sample(StandardNormal);
            SyntheticRow {
                product_id: i as u32 + 1,
                brand: brand.to_string(),
                price,
                color: color.to_string(),
                liked: label(price, color, noise),
            }
        })
        .collect();

    info!(rows = rows.len(), seed, "generated synthetic catalog");
    rows
}

/// Returns `(not_liked, liked)` counts.
pub fn label_counts(rows: &[SyntheticRow]) -> (usize, usize) {
    let liked = rows.iter().filter(|r| r.liked == 1).count();
    (rows.len() - liked, liked)
}

/// Writes `rows` as CSV with a header line.
pub fn write_rows<W: Write>(rows: &[SyntheticRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `rows` to `path`, replacing any previous file in one step.
pub fn save_csv(rows: &[SyntheticRow], path: &Path) -> Result<()> {
    let tmp = artifact::temp_sibling(path)?;
    write_rows(rows, tmp.as_file())?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
