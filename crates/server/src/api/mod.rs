mod heatmap;
mod home;
mod predict;

pub use heatmap::*;
pub use home::*;
pub use predict::*;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .route("/heatmap", get(heatmap))
        .with_state(state)
}
