use serde::{Deserialize, Serialize};

/// One row of the stop dataset. Other columns in the file are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StopRecord {
    #[serde(rename = "Stop")]
    pub stop: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// One labelled observation of the training dataset.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainingRecord {
    #[serde(rename = "Stop")]
    pub stop: String,
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: String,
    #[serde(rename = "Hour")]
    pub hour: f64,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "PassengerVolume", alias = "PassengerCount")]
    pub passenger_volume: f64,
}
