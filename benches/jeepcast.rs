use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use jeepcast::{
    dataset::{StopRecord, TrainingRecord},
    prelude::*,
    training,
};
use std::{hint::black_box, time::Duration};

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn stop_name(i: usize) -> String {
    format!("Stop {i:03}")
}

fn synthetic_predictor(stops: usize) -> Predictor {
    let mut records = Vec::new();
    for s in 0..stops {
        for (d, day) in DAYS.iter().enumerate() {
            for hour in (0..24).step_by(3) {
                records.push(TrainingRecord {
                    stop: stop_name(s),
                    day_of_week: day.to_string(),
                    hour: hour as f64,
                    season: "Regular".into(),
                    event: "Regular".into(),
                    passenger_volume: ((s * 7 + d * 3 + hour) % 90) as f64,
                });
            }
        }
    }
    let artifacts =
        training::fit(&records, TreeParams::default()).expect("Failed to fit synthetic model");
    Predictor::new(artifacts.encoder, artifacts.model)
}

fn synthetic_catalog(stops: usize) -> StopCatalog {
    StopCatalog::from_records((0..stops).map(|i| StopRecord {
        stop: stop_name(i),
        latitude: 7.0 + i as f64 * 0.001,
        longitude: 125.5 + i as f64 * 0.001,
    }))
}

fn criterion_benchmark(c: &mut Criterion) {
    const STOPS: usize = 200;
    let predictor = synthetic_predictor(STOPS);
    let catalog = synthetic_catalog(STOPS);
    let moment = Moment::at(
        &NaiveDate::from_ymd_opt(2025, 3, 10)
            .expect("valid date")
            .and_hms_opt(8, 0, 0)
            .expect("valid time"),
    );
    let view = MapView::default();

    let mut group = c.benchmark_group("Heatmap");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Build 200 stops", |b| {
        b.iter(|| black_box(Heatmap::build(&predictor, &catalog, moment)))
    });

    group.bench_function("Build and render 200 stops", |b| {
        b.iter(|| black_box(Heatmap::build(&predictor, &catalog, moment).render(&view)))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
