use chrono::Weekday;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::{path::Path, sync::Arc};
use thiserror::Error;

use crate::{
    model::{self, Encoder, OrdinalEncoder, RegressionTree, Regressor},
    shared::calendar::{Event, Moment, Season, weekday_name},
};

/// Column order of a model input row.
pub const FEATURE_COLUMNS: [&str; 5] = ["Stop", "DayOfWeek", "Hour", "Season", "Event"];
/// Columns passed through the encoder, in encoder order.
pub const CATEGORICAL_COLUMNS: [&str; 4] = ["Stop", "DayOfWeek", "Season", "Event"];

pub(crate) const HOUR_POSITION: usize = 2;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Encoding failed: {0}")]
    Encoding(#[source] model::Error),
    #[error("Inference failed: {0}")]
    Inference(String),
}

impl Error {
    pub const fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "ValidationError",
            Error::Encoding(_) => "EncodingError",
            Error::Inference(_) => "InferenceError",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub stop: Arc<str>,
    pub day_of_week: Weekday,
    pub hour: u8,
    pub season: Season,
    pub event: Event,
}

impl FeatureRecord {
    pub fn new(
        stop: impl Into<Arc<str>>,
        day_of_week: Weekday,
        hour: u8,
        season: Season,
        event: Event,
    ) -> Result<Self, Error> {
        let stop = stop.into();
        if stop.trim().is_empty() {
            return Err(Error::Validation("Stop must not be empty".into()));
        }
        if hour > 23 {
            return Err(Error::Validation(format!(
                "Hour must be between 0 and 23, got {hour}"
            )));
        }
        Ok(Self {
            stop,
            day_of_week,
            hour,
            season,
            event,
        })
    }

    /// Record for `stop` under a shared calendar snapshot.
    pub fn at(stop: Arc<str>, moment: &Moment) -> Self {
        Self {
            stop,
            day_of_week: moment.weekday,
            hour: moment.hour,
            season: moment.season,
            event: moment.event,
        }
    }

    pub const fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }

    pub fn categorical(&self) -> [&str; 4] {
        [
            self.stop.as_ref(),
            self.day_name(),
            self.season.as_str(),
            self.event.as_str(),
        ]
    }
}

/// Encoder and model pair loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Predictor<E = OrdinalEncoder, R = RegressionTree> {
    encoder: E,
    model: R,
}

impl<E, R> Predictor<E, R>
where
    E: Encoder + DeserializeOwned,
    R: Regressor + DeserializeOwned,
{
    /// Loads both artifacts and rejects any that would fail at request time.
    pub fn from_artifacts<P: AsRef<Path>>(model_path: P, encoder_path: P) -> Result<Self, model::Error> {
        let model: R = model::load_artifact(model_path)?;
        model.validate()?;
        let encoder: E = model::load_artifact(encoder_path)?;
        encoder.validate()?;
        Ok(Self { encoder, model })
    }
}

impl<E, R> Predictor<E, R>
where
    E: Encoder,
    R: Regressor,
{
    pub fn new(encoder: E, model: R) -> Self {
        Self { encoder, model }
    }

    /// Builds the numeric model row in [`FEATURE_COLUMNS`] order.
    pub fn encode(&self, record: &FeatureRecord) -> Result<Vec<f64>, Error> {
        let mut row = self
            .encoder
            .transform(&record.categorical())
            .map_err(Error::Encoding)?;
        if row.len() != CATEGORICAL_COLUMNS.len() {
            return Err(Error::Encoding(model::Error::Shape {
                expected: CATEGORICAL_COLUMNS.len(),
                actual: row.len(),
            }));
        }
        row.insert(HOUR_POSITION, record.hour as f64);
        Ok(row)
    }

    /// Predicted passenger volume, truncated toward zero.
    pub fn predict(&self, record: &FeatureRecord) -> Result<u32, Error> {
        let row = self.encode(record)?;
        let output = self
            .model
            .predict(&[row])
            .map_err(|err| Error::Inference(err.to_string()))?;
        let value = output
            .first()
            .copied()
            .ok_or(Error::Inference("Model returned no output".into()))?;
        if !value.is_finite() {
            return Err(Error::Inference(format!("Model returned {value}")));
        }
        Ok(value.trunc().max(0.0) as u32)
    }
}

impl<E, R> Predictor<E, R>
where
    E: Encoder + Sync,
    R: Regressor + Sync,
{
    /// One result per record, in input order. Failures stay per record.
    pub fn predict_many(&self, records: &[FeatureRecord]) -> Vec<Result<u32, Error>> {
        records
            .par_iter()
            .map(|record| self.predict(record))
            .collect()
    }
}
