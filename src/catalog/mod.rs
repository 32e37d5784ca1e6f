use std::{collections::HashSet, sync::Arc};
use tracing::info;

use crate::{
    dataset::{self, Dataset, StopRecord},
    shared::geo::Coordinate,
};

#[derive(Debug, Default, Clone)]
pub struct CatalogStop {
    pub index: u32,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

impl From<StopRecord> for CatalogStop {
    fn from(value: StopRecord) -> Self {
        Self {
            index: 0,
            name: value.stop.into(),
            coordinate: Coordinate {
                latitude: value.latitude,
                longitude: value.longitude,
            },
        }
    }
}

/// Deduplicated, immutable set of known stops.
#[derive(Debug, Clone, Default)]
pub struct StopCatalog {
    stops: Arc<[CatalogStop]>,
}

impl StopCatalog {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads the stop dataset once. The catalog never changes afterwards.
    pub fn load(dataset: &Dataset) -> Result<Self, dataset::Error> {
        let mut builder = CatalogBuilder::default();
        dataset.stream_stops(|(_, record)| builder.push(record))?;
        let catalog = builder.build();
        info!(
            "Loaded {} unique stops from {}",
            catalog.len(),
            dataset.config().stops_path
        );
        Ok(catalog)
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = StopRecord>,
    {
        let mut builder = CatalogBuilder::default();
        records.into_iter().for_each(|record| builder.push(record));
        builder.build()
    }

    pub fn stops(&self) -> &[CatalogStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[derive(Default)]
struct CatalogBuilder {
    seen: HashSet<(String, (u64, u64))>,
    stops: Vec<CatalogStop>,
}

impl CatalogBuilder {
    fn push(&mut self, record: StopRecord) {
        let mut stop: CatalogStop = record.into();
        let key = (stop.name.to_string(), stop.coordinate.key());
        if self.seen.insert(key) {
            stop.index = self.stops.len() as u32;
            self.stops.push(stop);
        }
    }

    fn build(self) -> StopCatalog {
        StopCatalog {
            stops: self.stops.into(),
        }
    }
}
