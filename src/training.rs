//! CSV in, model + encoder + metrics out.

use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::info;

use crate::artifact;
use crate::config;
use crate::encoder::ColorEncoder;
use crate::error::{Error, Result};
use crate::metrics::ClassificationReport;
use crate::model::LikeModel;
use crate::synthetic::SyntheticRow;

/// The columns the trainer needs; any other column in the file is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingRecord {
    pub price: f64,
    pub color: String,
    pub liked: u8,
}

impl From<SyntheticRow> for TrainingRecord {
    fn from(row: SyntheticRow) -> Self {
        TrainingRecord {
            price: f64::from(row.price),
            color: row.color,
            liked: row.liked,
        }
    }
}

/// A helper type for holding train/test splits.
#[derive(Debug)]
pub struct DatasetSplit<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

/// Shuffles with a seeded stream and carves off `ceil(len * test_ratio)` test rows.
pub fn train_test_split<T: Clone>(data: &[T], test_ratio: f64, seed: u64) -> DatasetSplit<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = data.to_vec();
    data.shuffle(&mut rng);

    let test_size = ((data.len() as f64) * test_ratio).ceil() as usize;
    let test_size = test_size.min(data.len());
    let train = data.split_off(test_size);

    DatasetSplit { train, test: data }
}

#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            test_ratio: config::TEST_RATIO,
            seed: config::SPLIT_SEED,
        }
    }
}

/// Where the three artifacts go.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoder: PathBuf,
    pub metrics: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        ArtifactPaths {
            model: config::MODEL_PATH.into(),
            encoder: config::ENCODER_PATH.into(),
            metrics: config::METRICS_PATH.into(),
        }
    }
}

#[derive(Debug)]
pub struct TrainedArtifacts {
    pub model: LikeModel,
    pub encoder: ColorEncoder,
    pub report: ClassificationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl TrainedArtifacts {
    /// Writes encoder, model and metrics. Each file is replaced atomically.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        self.encoder.save_to_file(&paths.encoder)?;
        self.model.save_to_file(&paths.model)?;
        artifact::write_text(&paths.metrics, &self.report.to_metrics_text())?;
        info!(
            model = %paths.model.display(),
            encoder = %paths.encoder.display(),
            metrics = %paths.metrics.display(),
            "artifacts saved"
        );
        Ok(())
    }
}

/// Reads a cleaned or synthetic CSV. Labels other than 0/1 are rejected.
pub fn load_records(path: &Path) -> Result<Vec<TrainingRecord>> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let mut rdr = csv::Reader::from_reader(File::open(path)?);
    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let record: TrainingRecord = result?;
        if record.liked > 1 {
            return Err(Error::InvalidLabel(record.liked, i + 1));
        }
        records.push(record);
    }
    info!(path = %path.display(), rows = records.len(), "training data loaded");
    Ok(records)
}

fn features(rows: &[(f64, usize, u8)]) -> Result<(Array2<f64>, Array1<u8>)> {
    let flat: Vec<f64> = rows
        .iter()
        .flat_map(|&(price, code, _)| [price, code as f64])
        .collect();
    let x = Array2::from_shape_vec((rows.len(), 2), flat)?;
    let y = rows.iter().map(|&(_, _, liked)| liked).collect();
    Ok((x, y))
}

/// Fits encoder and model and scores the held-out split. Writes nothing.
pub fn train(records: &[TrainingRecord], config: &TrainConfig) -> Result<TrainedArtifacts> {
    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let encoder = ColorEncoder::fit(records.iter().map(|r| r.color.as_str()))?;
    let encoded = records
        .iter()
        .map(|r| -> Result<(f64, usize, u8)> {
            Ok((r.price, encoder.encode(&r.color)?, r.liked))
        })
        .collect::<Result<Vec<_>>>()?;

    let split = train_test_split(&encoded, config.test_ratio, config.seed);
    let (x_train, y_train) = features(&split.train)?;
    let (x_test, y_test) = features(&split.test)?;

    info!(
        train_rows = split.train.len(),
        test_rows = split.test.len(),
        colors = encoder.classes().len(),
        "fitting logistic regression"
    );
    let model = LikeModel::fit(&x_train, &y_train, &encoder)?;

    let predicted = model.predict(&x_test);
    let report = ClassificationReport::new(&y_test.to_vec(), &predicted.to_vec());
    info!(accuracy = report.accuracy, "evaluation complete");

    Ok(TrainedArtifacts {
        model: model.with_accuracy(report.accuracy),
        encoder,
        report,
        train_rows: split.train.len(),
        test_rows: split.test.len(),
    })
}

/// Full trainer stage: load `data`, fit, then write all artifacts.
pub fn run(data: &Path, paths: &ArtifactPaths, config: &TrainConfig) -> Result<TrainedArtifacts> {
    let records = load_records(data)?;
    let trained = train(&records, config)?;
    trained.save(paths)?;
    Ok(trained)
}
