mod common;

use chrono::Weekday;
use jeepcast::{
    model::{self, OrdinalEncoder, RegressionTree},
    predict::{Error, FeatureRecord, Predictor},
    shared::{Event, Season},
};

fn record(stop: &str, hour: u8) -> FeatureRecord {
    FeatureRecord::new(stop, Weekday::Mon, hour, Season::Regular, Event::Regular).unwrap()
}

#[test]
fn prediction_is_deterministic() {
    let predictor = common::predictor();
    let record = record("Agdao", 8);
    let first = predictor.predict(&record).unwrap();
    for _ in 0..10 {
        assert_eq!(predictor.predict(&record).unwrap(), first);
    }
}

#[test]
fn prediction_tracks_training_targets() {
    let predictor = common::predictor();
    // Agdao, Monday, 08:00, Regular season, Regular event
    let expected = 20.0 + 8.0 + 0.0 + 4.0 * 3.0 - 5.0;
    let got = predictor.predict(&record("Agdao", 8)).unwrap();
    assert_eq!(got, expected as u32);
}

#[test]
fn unknown_stop_is_an_encoding_error() {
    let predictor = common::predictor();
    let err = predictor.predict(&record("Mintal", 8)).unwrap_err();
    assert!(matches!(
        err,
        Error::Encoding(model::Error::UnknownCategory { .. })
    ));
    assert_eq!(err.kind(), "EncodingError");
}

#[test]
fn hour_out_of_range_is_rejected() {
    let err = FeatureRecord::new("Agdao", Weekday::Mon, 24, Season::Regular, Event::Regular)
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn empty_stop_is_rejected() {
    assert!(FeatureRecord::new(" ", Weekday::Mon, 8, Season::Regular, Event::Regular).is_err());
}

#[test]
fn encoded_row_keeps_hour_in_place() {
    let predictor = common::predictor();
    let row = predictor.encode(&record("Toril", 17)).unwrap();
    assert_eq!(row.len(), 5);
    assert_eq!(row[2], 17.0);
}

#[test]
fn batch_keeps_failures_per_record() {
    let predictor = common::predictor();
    let results = predictor.predict_many(&[record("Agdao", 8), record("Mintal", 8), record("Toril", 6)]);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

#[test]
fn unfitted_model_is_an_inference_error() {
    let artifacts =
        jeepcast::training::fit(&common::training_records(), Default::default()).unwrap();
    let predictor = Predictor::new(artifacts.encoder, RegressionTree::default());
    let err = predictor.predict(&record("Agdao", 8)).unwrap_err();
    assert!(matches!(err, Error::Inference(_)));
}

#[test]
fn artifacts_load_back() {
    let dir = common::temp_dir("artifacts");
    let model_path = dir.join("model/pujPassModel.json");
    let encoder_path = dir.join("model/encoders.json");

    let artifacts =
        jeepcast::training::fit(&common::training_records(), Default::default()).unwrap();
    model::save_artifact(&model_path, &artifacts.model).unwrap();
    model::save_artifact(&encoder_path, &artifacts.encoder).unwrap();

    let loaded: Predictor<OrdinalEncoder, RegressionTree> =
        Predictor::from_artifacts(&model_path, &encoder_path).unwrap();
    let fresh = Predictor::new(artifacts.encoder, artifacts.model);
    assert_eq!(
        loaded.predict(&record("Bajada", 12)).unwrap(),
        fresh.predict(&record("Bajada", 12)).unwrap()
    );
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_artifact_fails() {
    let dir = common::temp_dir("missing");
    let result: Result<Predictor, _> =
        Predictor::from_artifacts(dir.join("model.json"), dir.join("encoders.json"));
    assert!(matches!(result, Err(model::Error::Io(_))));
}

#[test]
fn malformed_artifacts_are_rejected_on_load() {
    let dir = common::temp_dir("malformed");
    std::fs::create_dir_all(&dir).unwrap();
    let artifacts =
        jeepcast::training::fit(&common::training_records(), Default::default()).unwrap();
    let good_model = dir.join("model.json");
    let good_encoder = dir.join("encoders.json");
    model::save_artifact(&good_model, &artifacts.model).unwrap();
    model::save_artifact(&good_encoder, &artifacts.encoder).unwrap();

    let dangling_model = dir.join("dangling.json");
    std::fs::write(
        &dangling_model,
        r#"{"params":{"max_depth":12,"min_samples_split":2,"min_samples_leaf":1},
            "n_features":5,
            "nodes":[{"kind":"Split","feature":2,"threshold":5.0,"left":7,"right":9}]}"#,
    )
    .unwrap();
    let result: Result<Predictor, _> = Predictor::from_artifacts(&dangling_model, &good_encoder);
    assert!(matches!(result, Err(model::Error::Malformed(_))));

    let unsorted_encoder = dir.join("unsorted.json");
    std::fs::write(
        &unsorted_encoder,
        r#"{"columns":["Stop","DayOfWeek","Season","Event"],
            "categories":[["Toril","Agdao","Bajada"],["Monday"],["Regular"],["Regular"]]}"#,
    )
    .unwrap();
    let result: Result<Predictor, _> = Predictor::from_artifacts(&good_model, &unsorted_encoder);
    assert!(matches!(result, Err(model::Error::Malformed(_))));

    let _ = std::fs::remove_dir_all(dir);
}
