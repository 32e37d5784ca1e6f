pub mod catalog;
pub mod dataset;
pub mod heatmap;
pub mod model;
pub mod predict;
pub mod shared;
pub mod training;

pub mod prelude {
    pub use crate::catalog::{CatalogStop, StopCatalog};
    pub use crate::dataset;
    pub use crate::heatmap::{HeatPoint, Heatmap, MapView};
    pub use crate::model::{
        Encoder, OrdinalEncoder, RegressionTree, Regressor, TreeParams, load_artifact,
        save_artifact,
    };
    pub use crate::predict::{FeatureRecord, Predictor};
    pub use crate::shared::{Coordinate, Event, Moment, Season, classify};
}
