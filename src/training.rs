use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::{
    dataset::{self, Dataset, TrainingRecord},
    model::{self, Encoder, OrdinalEncoder, RegressionTree, Regressor, TreeParams},
    predict::{CATEGORICAL_COLUMNS, HOUR_POSITION},
    shared::calendar::{Event, LabelError, Season, parse_weekday, weekday_name},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset error: {0}")]
    Dataset(#[from] dataset::Error),
    #[error("Model error: {0}")]
    Model(#[from] model::Error),
    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub rows: usize,
    pub nodes: usize,
    pub depth: usize,
    pub mean_absolute_error: f64,
    pub r_squared: f64,
}

pub struct TrainedArtifacts {
    pub encoder: OrdinalEncoder,
    pub model: RegressionTree,
    pub report: TrainingReport,
}

/// Fits the encoder on the categorical columns, then the tree on the encoded
/// rows (hour truncated to a whole number).
pub fn fit(records: &[TrainingRecord], params: TreeParams) -> Result<TrainedArtifacts, Error> {
    let categorical = records
        .iter()
        .enumerate()
        .map(|(row, record)| categorical_row(row, record))
        .collect::<Result<Vec<_>, Error>>()?;
    let mut encoder = OrdinalEncoder::new(&CATEGORICAL_COLUMNS);
    encoder.fit(&categorical)?;

    let rows = categorical
        .iter()
        .zip(records)
        .map(|(values, record)| {
            let mut row = encoder.transform(values)?;
            row.insert(HOUR_POSITION, record.hour.trunc());
            Ok(row)
        })
        .collect::<Result<Vec<_>, model::Error>>()?;
    let targets: Vec<f64> = records.iter().map(|record| record.passenger_volume).collect();

    let mut model = RegressionTree::new(params);
    model.fit(&rows, &targets)?;

    let predictions = model.predict(&rows)?;
    let report = TrainingReport {
        rows: rows.len(),
        nodes: model.nodes().len(),
        depth: model.depth(),
        mean_absolute_error: mean_absolute_error(&targets, &predictions),
        r_squared: r_squared(&targets, &predictions),
    };
    Ok(TrainedArtifacts {
        encoder,
        model,
        report,
    })
}

pub fn train_and_save<P: AsRef<Path>>(
    dataset: &Dataset,
    model_path: P,
    encoder_path: P,
    params: TreeParams,
) -> Result<TrainingReport, Error> {
    let mut records = Vec::new();
    dataset.stream_training(|(_, record)| records.push(record))?;
    info!(
        "Loaded {} training rows from {}",
        records.len(),
        dataset.config().training_path
    );

    let artifacts = fit(&records, params)?;
    model::save_artifact(&model_path, &artifacts.model)?;
    model::save_artifact(&encoder_path, &artifacts.encoder)?;
    info!(
        "Saved model to {} and encoder to {}",
        model_path.as_ref().display(),
        encoder_path.as_ref().display()
    );
    Ok(artifacts.report)
}

/// Labels are normalised the same way request fields are, so a dataset that
/// writes `Mon` or `regular` still lines up with served predictions.
fn categorical_row(row: usize, record: &TrainingRecord) -> Result<Vec<&str>, Error> {
    let invalid = |message: String| Error::InvalidRow { row, message };
    if !record.hour.is_finite() || !record.passenger_volume.is_finite() {
        return Err(invalid("Hour and PassengerVolume must be numbers".into()));
    }
    let weekday = parse_weekday(&record.day_of_week).map_err(|err| invalid(err.to_string()))?;
    let season: Season = record.season.parse().map_err(|err: LabelError| invalid(err.to_string()))?;
    let event: Event = record.event.parse().map_err(|err: LabelError| invalid(err.to_string()))?;
    Ok(vec![
        record.stop.as_str(),
        weekday_name(weekday),
        season.as_str(),
        event.as_str(),
    ])
}

fn mean_absolute_error(targets: &[f64], predictions: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    targets
        .iter()
        .zip(predictions)
        .map(|(y, p)| (y - p).abs())
        .sum::<f64>()
        / targets.len() as f64
}

fn r_squared(targets: &[f64], predictions: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let mean = targets.iter().sum::<f64>() / targets.len() as f64;
    let total: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();
    let residual: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    if total == 0.0 {
        return if residual == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - residual / total
}

#[test]
fn r_squared_perfect_fit_test() {
    let targets = [1.0, 2.0, 3.0];
    assert_eq!(r_squared(&targets, &targets), 1.0);
    assert_eq!(mean_absolute_error(&targets, &[2.0, 2.0, 2.0]), 2.0 / 3.0);
}
