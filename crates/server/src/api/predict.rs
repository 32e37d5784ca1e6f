use crate::{
    dto::{PredictRequest, PredictionDto},
    error::ApiError,
    state::AppState,
};
use axum::{Json, body::Bytes, extract::State};
use jeepcast::predict;
use std::sync::Arc;

pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionDto>, ApiError> {
    let request: PredictRequest = serde_json::from_slice(&body)
        .map_err(|err| predict::Error::Validation(err.to_string()))?;
    let record = request.into_record()?;
    let volume = state.predictor.predict(&record)?;
    Ok(Json(PredictionDto::from(&record, volume)))
}
