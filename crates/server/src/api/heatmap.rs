use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Html};
use jeepcast::prelude::*;
use std::sync::Arc;
use tracing::error;

pub async fn heatmap(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    let moment = Moment::now();
    tokio::task::spawn_blocking(move || {
        Heatmap::build(&state.predictor, &state.catalog, moment).render(&state.view)
    })
    .await
    .map(Html)
    .map_err(|err| {
        error!("Heatmap render failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing;

    #[tokio::test]
    async fn renders_known_stops() {
        let Html(html) = heatmap(State(testing::state())).await.unwrap();
        assert!(html.contains("L.heatLayer([[7.0894,125.6232,"));
        assert!(html.contains("[7.0186,125.4981,"));
    }
}
