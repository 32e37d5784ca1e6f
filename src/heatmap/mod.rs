use serde_json::json;
use tracing::{info, warn};

use crate::{
    catalog::StopCatalog,
    model::{Encoder, Regressor},
    predict::{FeatureRecord, Predictor},
    shared::{calendar::Moment, geo::Coordinate},
};

const TEMPLATE: &str = include_str!("template.html");

/// Map framing and heat layer styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate {
                latitude: 7.07,
                longitude: 125.61,
            },
            zoom: 12,
            radius: 25,
            blur: 15,
            max_zoom: 13,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub coordinate: Coordinate,
    pub weight: u32,
}

#[derive(Debug, Clone)]
pub struct Heatmap {
    pub moment: Moment,
    pub points: Vec<HeatPoint>,
    pub skipped: usize,
}

impl Heatmap {
    /// Predicts every catalog stop under one calendar snapshot. Stops that
    /// fail to encode or predict are skipped.
    pub fn build<E, R>(predictor: &Predictor<E, R>, catalog: &StopCatalog, moment: Moment) -> Self
    where
        E: Encoder + Sync,
        R: Regressor + Sync,
    {
        let records: Vec<FeatureRecord> = catalog
            .stops()
            .iter()
            .map(|stop| FeatureRecord::at(stop.name.clone(), &moment))
            .collect();

        let mut points = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for (stop, result) in catalog.stops().iter().zip(predictor.predict_many(&records)) {
            match result {
                Ok(weight) => points.push(HeatPoint {
                    coordinate: stop.coordinate,
                    weight,
                }),
                Err(err) => {
                    skipped += 1;
                    warn!("Skipping stop {} at {}: {err}", stop.name, stop.coordinate);
                }
            }
        }

        info!(
            "Heatmap points: {} for {} {:02}:00 (season {}, event {})",
            points.len(),
            moment.day_name(),
            moment.hour,
            moment.season,
            moment.event
        );
        Self {
            moment,
            points,
            skipped,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "Predicted passenger volume, {} {:02}:00 ({} season, {} event)",
            self.moment.day_name(),
            self.moment.hour,
            self.moment.season,
            self.moment.event
        )
    }

    /// Standalone HTML document. The heat layer is left out when there are
    /// no points.
    pub fn render(&self, view: &MapView) -> String {
        let center = json!([view.center.latitude, view.center.longitude]);
        let heat_layer = if self.points.is_empty() {
            String::new()
        } else {
            let data: Vec<[f64; 3]> = self
                .points
                .iter()
                .map(|point| {
                    [
                        point.coordinate.latitude,
                        point.coordinate.longitude,
                        point.weight as f64,
                    ]
                })
                .collect();
            format!(
                "        L.heatLayer({}, {}).addTo(map);",
                json!(data),
                json!({ "radius": view.radius, "blur": view.blur, "maxZoom": view.max_zoom })
            )
        };

        TEMPLATE
            .replace("{{title}}", &self.title())
            .replace("{{center}}", &center.to_string())
            .replace("{{zoom}}", &view.zoom.to_string())
            .replace("{{heat_layer}}", &heat_layer)
    }
}
