//! Core data structures for ensemble weather prediction.

mod observation;
mod point;
mod source;

pub use observation::{Measurements, Variable, WeatherObservation, OBSERVATION_FORECAST_HOUR};
pub use point::EnsemblePoint;
pub use source::ModelSource;
