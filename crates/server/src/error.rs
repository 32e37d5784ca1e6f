use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jeepcast::predict;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
    pub kind: &'static str,
}

#[derive(Debug)]
pub struct ApiError(pub predict::Error);

impl From<predict::Error> for ApiError {
    fn from(value: predict::Error) -> Self {
        Self(value)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            predict::Error::Validation(_) => StatusCode::BAD_REQUEST,
            predict::Error::Encoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
            predict::Error::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Prediction failed: {}", self.0);
        } else {
            warn!("Rejected prediction request: {}", self.0);
        }
        let body = ErrorDto {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}
