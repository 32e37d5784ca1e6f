#![allow(dead_code)]

use jeepcast::{
    catalog::StopCatalog,
    dataset::{StopRecord, TrainingRecord},
    model::TreeParams,
    predict::Predictor,
    training,
};

pub const STOPS: [(&str, f64, f64); 3] = [
    ("Agdao", 7.0894, 125.6232),
    ("Bajada", 7.0921, 125.6126),
    ("Toril", 7.0186, 125.4981),
];

fn record(stop: &str, day: &str, hour: f64, season: &str, event: &str, volume: f64) -> TrainingRecord {
    TrainingRecord {
        stop: stop.into(),
        day_of_week: day.into(),
        hour,
        season: season.into(),
        event: event.into(),
        passenger_volume: volume,
    }
}

/// Every stop, every weekday, a handful of hours, all seasons and events.
pub fn training_records() -> Vec<TrainingRecord> {
    let days = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    let seasons = ["Christmas", "Summer", "Graduation", "Kadayawan", "Regular"];
    let events = ["NewYear", "Regular"];
    let mut records = Vec::new();
    for (s, (stop, _, _)) in STOPS.iter().enumerate() {
        for (d, day) in days.iter().enumerate() {
            for hour in [0.0, 6.0, 8.0, 12.0, 17.0, 23.0] {
                for (n, season) in seasons.iter().enumerate() {
                    for (e, event) in events.iter().enumerate() {
                        let volume = 20.0 * (s + 1) as f64 + hour + d as f64 + n as f64 * 3.0
                            - e as f64 * 5.0;
                        records.push(record(stop, day, hour, season, event, volume));
                    }
                }
            }
        }
    }
    records
}

pub fn predictor() -> Predictor {
    let params = TreeParams {
        max_depth: 24,
        ..Default::default()
    };
    let artifacts = training::fit(&training_records(), params).unwrap();
    Predictor::new(artifacts.encoder, artifacts.model)
}

pub fn catalog_with(extra: &[(&str, f64, f64)]) -> StopCatalog {
    StopCatalog::from_records(STOPS.iter().chain(extra).map(|(stop, lat, lon)| StopRecord {
        stop: stop.to_string(),
        latitude: *lat,
        longitude: *lon,
    }))
}

pub fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("jeepcast-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
