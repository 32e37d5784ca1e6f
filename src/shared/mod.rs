pub mod calendar;
pub mod geo;

pub use calendar::*;
pub use geo::*;
