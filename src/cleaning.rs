//! Turns a raw fashion catalog into a `price, color, rating, liked` table.
//!
//! Filtering runs as an ordered cascade of [`FilterStage`]s. Each stage keeps
//! its matches only when there are enough of them; otherwise it passes its
//! input through untouched and logs a warning, so a small catalog still yields
//! something to train on.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::artifact;
use crate::config;
use crate::error::{Error, Result};

/// One catalog line. Every field may be absent or unparsable in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProductRow {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub colour: Option<String>,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRow {
    pub price: f64,
    pub color: String,
    pub rating: f64,
    pub liked: u8,
}

/// A keyword filter that only applies when it leaves more than `min_rows` rows.
#[derive(Debug, Clone, Copy)]
pub struct FilterStage {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub min_rows: usize,
}

/// Default cascade: kids' items first, then T-shirts among them.
pub const DEFAULT_STAGES: [FilterStage; 2] = [
    FilterStage {
        label: "kids",
        keywords: config::KIDS_KEYWORDS,
        min_rows: config::KIDS_MIN_ROWS,
    },
    FilterStage {
        label: "t-shirt",
        keywords: config::TSHIRT_KEYWORDS,
        min_rows: config::TSHIRT_MIN_ROWS,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    pub label: &'static str,
    pub matched: usize,
    pub applied: bool,
}

#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub rows: Vec<CleanedRow>,
    pub input_rows: usize,
    pub stages: Vec<StageOutcome>,
}

impl FilterStage {
    /// Case-insensitive keyword match on the product name.
    pub fn matches(&self, row: &RawProductRow) -> bool {
        let Some(name) = row.name.as_deref() else {
            return false;
        };
        let name = name.to_lowercase();
        self.keywords
            .iter()
            .any(|kw| name.contains(&kw.to_lowercase()))
    }

    /// Keeps the matches if there are more than `min_rows`, else returns `rows` unchanged.
    pub fn apply(&self, rows: Vec<RawProductRow>) -> (Vec<RawProductRow>, StageOutcome) {
        let matched: Vec<RawProductRow> =
            rows.iter().filter(|r| self.matches(r)).cloned().collect();
        let count = matched.len();

        if count > self.min_rows {
            info!(stage = self.label, rows = count, "filter applied");
            let outcome = StageOutcome {
                label: self.label,
                matched: count,
                applied: true,
            };
            (matched, outcome)
        } else {
            warn!(
                stage = self.label,
                matched = count,
                required = self.min_rows + 1,
                "too few matches, keeping unfiltered rows"
            );
            let outcome = StageOutcome {
                label: self.label,
                matched: count,
                applied: false,
            };
            (rows, outcome)
        }
    }
}

/// 1 when `rating` is strictly above the threshold.
pub fn liked_from_rating(rating: f64) -> u8 {
    u8::from(rating > config::RATING_THRESHOLD)
}

/// Runs the filter cascade, drops incomplete rows and derives the label.
pub fn clean(rows: Vec<RawProductRow>, stages: &[FilterStage]) -> Result<CleaningOutcome> {
    let input_rows = rows.len();
    let mut outcomes = Vec::with_capacity(stages.len());
    let mut current = rows;

    for stage in stages {
        let (next, outcome) = stage.apply(current);
        current = next;
        outcomes.push(outcome);
    }

    let cleaned: Vec<CleanedRow> = current
        .into_iter()
        .filter_map(|r| match (r.price, r.colour, r.avg_rating) {
            (Some(price), Some(color), Some(rating)) if price > 0.0 => Some(CleanedRow {
                price,
                color,
                rating,
                liked: liked_from_rating(rating),
            }),
            _ => None,
        })
        .collect();

    if cleaned.is_empty() {
        return Err(Error::EmptyDataset);
    }

    info!(input_rows, output_rows = cleaned.len(), "cleaning complete");
    Ok(CleaningOutcome {
        rows: cleaned,
        input_rows,
        stages: outcomes,
    })
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase()
}

fn find_column(headers: &[String], required: &'static str, aliases: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.as_str()))
        .ok_or(Error::MissingColumn(required))
}

fn text_field(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(record: &csv::StringRecord, idx: usize) -> Option<f64> {
    record
        .get(idx)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Reads a catalog with flexible headers (trimmed, case-insensitive).
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<RawProductRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();

    let name = find_column(&headers, "name", &["name", "product_name"])?;
    let price = find_column(&headers, "price", &["price"])?;
    let colour = find_column(&headers, "colour", &["colour", "color"])?;
    let rating = find_column(&headers, "avg_rating", &["avg_rating", "rating"])?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(RawProductRow {
            name: text_field(&record, name),
            price: number_field(&record, price),
            colour: text_field(&record, colour),
            avg_rating: number_field(&record, rating),
        });
    }
    Ok(rows)
}

/// Reads the raw catalog file; a missing file is `MissingInput`.
pub fn load_catalog(path: &Path) -> Result<Vec<RawProductRow>> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let rows = read_catalog(File::open(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "catalog loaded");
    Ok(rows)
}

/// Writes `price,color,rating,liked` rows, replacing `path` atomically.
pub fn save_cleaned(rows: &[CleanedRow], path: &Path) -> Result<()> {
    let tmp = artifact::temp_sibling(path)?;
    {
        let mut wtr = csv::Writer::from_writer(tmp.as_file());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    }
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Load, clean and write in one go. Nothing is written when cleaning fails.
pub fn run(input: &Path, output: &Path) -> Result<CleaningOutcome> {
    let raw = load_catalog(input)?;
    let outcome = clean(raw, &DEFAULT_STAGES)?;
    save_cleaned(&outcome.rows, output)?;
    info!(path = %output.display(), rows = outcome.rows.len(), "cleaned data saved");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, price: f64, colour: &str, rating: f64) -> RawProductRow {
        RawProductRow {
            name: Some(name.to_string()),
            price: Some(price),
            colour: Some(colour.to_string()),
            avg_rating: Some(rating),
        }
    }

    fn catalog(kids_tees: usize, kids_other: usize, adults: usize) -> Vec<RawProductRow> {
        let mut rows = Vec::new();
        for i in 0..kids_tees {
            rows.push(row(&format!("Boys Printed T-Shirt {i}"), 399.0, "Red", 4.5));
        }
        for i in 0..kids_other {
            rows.push(row(&format!("Girls Denim Shorts {i}"), 599.0, "Blue", 3.9));
        }
        for i in 0..adults {
            rows.push(row(&format!("Men Slim T-shirt {i}"), 999.0, "Black", 4.0));
        }
        rows
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let stage = DEFAULT_STAGES[0];
        assert!(stage.matches(&row("KIDS hoodie", 1.0, "Red", 1.0)));
        assert!(stage.matches(&row("junior tee", 1.0, "Red", 1.0)));
        assert!(!stage.matches(&row("Women Kurta", 1.0, "Red", 1.0)));
        assert!(!stage.matches(&RawProductRow::default()));
    }

    #[test]
    fn both_filters_apply_on_large_catalog() {
        let out = clean(catalog(80, 40, 30), &DEFAULT_STAGES).unwrap();
        assert!(out.stages.iter().all(|s| s.applied));
        assert_eq!(out.rows.len(), 80);
        assert!(out.rows.iter().all(|r| r.color == "Red" && r.liked == 1));
    }

    #[test]
    fn threshold_is_exclusive() {
        // exactly 100 kids rows is not enough
        let out = clean(catalog(60, 40, 20), &DEFAULT_STAGES).unwrap();
        assert!(!out.stages[0].applied);
        assert_eq!(out.stages[0].matched, 100);
    }

    #[test]
    fn kids_fallback_equals_skipping_the_stage() {
        let raw = catalog(60, 10, 30);
        let with_fallback = clean(raw.clone(), &DEFAULT_STAGES).unwrap();
        let skipped = clean(raw, &DEFAULT_STAGES[1..]).unwrap();
        assert!(!with_fallback.stages[0].applied);
        assert_eq!(with_fallback.rows, skipped.rows);
    }

    #[test]
    fn tshirt_fallback_keeps_kids_rows() {
        let out = clean(catalog(20, 90, 0), &DEFAULT_STAGES).unwrap();
        assert!(out.stages[0].applied);
        assert!(!out.stages[1].applied);
        assert_eq!(out.rows.len(), 110);
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let mut raw = vec![row("Kid T-shirt", 300.0, "Red", 4.2)];
        raw.push(RawProductRow {
            price: None,
            ..row("Kid T-shirt", 0.0, "Red", 4.2)
        });
        raw.push(RawProductRow {
            colour: None,
            ..row("Kid T-shirt", 300.0, "", 4.2)
        });
        raw.push(RawProductRow {
            avg_rating: None,
            ..row("Kid T-shirt", 300.0, "Red", 0.0)
        });
        raw.push(row("Kid T-shirt", 0.0, "Red", 4.8));
        let out = clean(raw, &DEFAULT_STAGES).unwrap();
        assert_eq!(out.rows.len(), 1);
    }

    #[test]
    fn liked_is_strictly_above_threshold() {
        assert_eq!(liked_from_rating(4.1), 0);
        assert_eq!(liked_from_rating(4.11), 1);
        assert_eq!(liked_from_rating(1.0), 0);
    }

    #[test]
    fn empty_result_is_fatal() {
        let raw = vec![RawProductRow {
            name: Some("Kid T-shirt".into()),
            ..Default::default()
        }];
        assert!(matches!(
            clean(raw, &DEFAULT_STAGES),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn headers_are_trimmed_and_case_insensitive() {
        let csv = " Name ,PRICE,Colour , Avg_Rating\nBoys T-shirt,499,Red,4.4\nGirls Top,,Pink,3\n";
        let rows = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].price, Some(499.0));
        assert_eq!(rows[1].price, None);
        assert_eq!(rows[1].colour.as_deref(), Some("Pink"));
    }

    #[test]
    fn missing_column_is_named() {
        let csv = "name,price,avg_rating\nBoys T-shirt,499,4.4\n";
        match read_catalog(csv.as_bytes()) {
            Err(Error::MissingColumn(col)) => assert_eq!(col, "colour"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn run_writes_nothing_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("clean.csv");
        let err = run(&dir.path().join("absent.csv"), &output).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert!(!output.exists());
    }

    #[test]
    fn run_writes_cleaned_columns() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("out/clean.csv");
        std::fs::write(
            &input,
            "name,price,colour,avg_rating\nBoys T-shirt,499,Red,4.4\n",
        )
        .unwrap();

        let out = run(&input, &output).unwrap();
        assert_eq!(out.rows.len(), 1);
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("price,color,rating,liked\n"));

        let mut rdr = csv::Reader::from_path(&output).unwrap();
        let back: Vec<CleanedRow> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, out.rows);
    }
}
