use jeepcast::prelude::*;

/// Read-only after startup; handlers share it through an `Arc`.
pub struct AppState {
    pub predictor: Predictor,
    pub catalog: StopCatalog,
    pub view: MapView,
}

impl AppState {
    pub fn new(predictor: Predictor, catalog: StopCatalog) -> Self {
        Self {
            predictor,
            catalog,
            view: MapView::default(),
        }
    }
}
