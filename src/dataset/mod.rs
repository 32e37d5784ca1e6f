use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file: {}", .0.display())]
    FileNotFound(PathBuf),
}

#[derive(Default)]
pub struct Dataset {
    config: Config,
}

impl Dataset {
    pub fn new(config: self::Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, StopRecord)),
    {
        stream_from_file::<StopRecord, F>(Path::new(&self.config.stops_path), f)
    }

    pub fn stream_training<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, TrainingRecord)),
    {
        stream_from_file::<TrainingRecord, F>(Path::new(&self.config.training_path), f)
    }
}

fn stream_from_file<T, F>(path: &Path, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    if !path.exists() {
        return Err(self::Error::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    stream_from_reader(file, f)
}

/// Deserializes every row of a headered csv. A malformed row fails the whole
/// stream so a broken dataset never loads partially.
fn stream_from_reader<R, T, F>(reader: R, mut f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::Reader::from_reader(reader);
    for (i, result) in reader.deserialize().enumerate() {
        let record: T = result?;
        f((i, record));
    }
    Ok(())
}
