use jeepcast::{
    predict::{self, FeatureRecord},
    shared::{Event, Season, parse_weekday},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "Stop")]
    pub stop: String,
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: String,
    #[serde(rename = "Hour")]
    pub hour: Value,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Event")]
    pub event: String,
}

impl PredictRequest {
    pub fn into_record(self) -> Result<FeatureRecord, predict::Error> {
        let invalid = |err: &dyn std::fmt::Display| predict::Error::Validation(err.to_string());
        let day_of_week = parse_weekday(&self.day_of_week).map_err(|err| invalid(&err))?;
        let season: Season = self.season.parse().map_err(|err| invalid(&err))?;
        let event: Event = self.event.parse().map_err(|err| invalid(&err))?;
        let hour = coerce_hour(&self.hour)?;
        FeatureRecord::new(self.stop, day_of_week, hour, season, event)
    }
}

/// Numbers are truncated toward zero, numeric strings are parsed.
fn coerce_hour(value: &Value) -> Result<u8, predict::Error> {
    let hour = match value {
        Value::Number(number) => number.as_f64().map(f64::trunc),
        Value::String(text) => text.trim().parse::<i64>().ok().map(|hour| hour as f64),
        _ => None,
    }
    .ok_or_else(|| predict::Error::Validation(format!("Hour must be an integer, got {value}")))?;

    if !(0.0..=23.0).contains(&hour) {
        return Err(predict::Error::Validation(format!(
            "Hour must be between 0 and 23, got {hour}"
        )));
    }
    Ok(hour as u8)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDto {
    #[serde(rename = "Stop")]
    pub stop: String,
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: String,
    #[serde(rename = "Hour")]
    pub hour: u8,
    #[serde(rename = "Season")]
    pub season: Season,
    #[serde(rename = "Event")]
    pub event: Event,
    #[serde(rename = "PredictedPassengerVolume")]
    pub predicted_passenger_volume: u32,
}

impl PredictionDto {
    pub fn from(record: &FeatureRecord, volume: u32) -> Self {
        Self {
            stop: record.stop.to_string(),
            day_of_week: record.day_name().to_string(),
            hour: record.hour,
            season: record.season,
            event: record.event,
            predicted_passenger_volume: volume,
        }
    }
}
