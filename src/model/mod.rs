use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};
use thiserror::Error;

mod encoder;
mod tree;
pub use encoder::*;
pub use tree::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown value {value:?} in column {column}")]
    UnknownCategory { column: String, value: String },
    #[error("Expected {expected} columns but got {actual}")]
    Shape { expected: usize, actual: usize },
    #[error("Got {rows} rows but {targets} targets")]
    TargetMismatch { rows: usize, targets: usize },
    #[error("Model has not been fitted")]
    NotFitted,
    #[error("Malformed artifact: {0}")]
    Malformed(String),
    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps categorical string values to numeric codes.
pub trait Encoder {
    fn fit(&mut self, rows: &[Vec<&str>]) -> Result<(), Error>;
    fn transform(&self, row: &[&str]) -> Result<Vec<f64>, Error>;
    /// Structural check of a loaded encoder, before it serves any request.
    fn validate(&self) -> Result<(), Error>;
}

/// Scalar regression over numeric feature rows.
pub trait Regressor {
    fn fit(&mut self, rows: &[Vec<f64>], targets: &[f64]) -> Result<(), Error>;
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, Error>;
    /// Structural check of a loaded model, before it serves any request.
    fn validate(&self) -> Result<(), Error>;
}

pub fn save_artifact<T, P>(path: P, artifact: &T) -> Result<(), Error>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, artifact)?;
    writer.flush()?;
    Ok(())
}

pub fn load_artifact<T, P>(path: P) -> Result<T, Error>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
