//! # weather-ensemble
//!
//! Multi-model weather prediction ensemble.
//!
//! Combines forecasts from the AIFS and GraphCast AI models with optional
//! EUMETSAT historical observations: raw payloads are standardized into
//! typed observations, aligned into hourly buckets, fused with per-source
//! weights, and summarized with model-agreement statistics and rule-based
//! recommendations.
//!
//! ```
//! use weather_ensemble::prelude::*;
//! use serde_json::json;
//!
//! let engine = EnsembleEngine::new(EnsembleConfig::default()).unwrap();
//! let result = engine.create_ensemble_from_json(
//!     &json!({"forecast_data": [{"time": "2025-01-15T12:00:00Z", "temperature_2m": 22.5}],
//!             "metadata": {"is_mock": false}}),
//!     &json!({"hourly_data": [{"time": "2025-01-15T12:00:00Z", "temperature": 23.1}],
//!             "metadata": {"is_mock": false}}),
//!     None,
//! );
//! assert_eq!(result.ensemble_forecast[0].value(Variable::Temperature), Some(22.77));
//! ```

pub mod core;
pub mod ensemble;
pub mod error;
pub mod report;
pub mod sources;
pub mod utils;

pub use error::{EnsembleError, Result};

pub mod prelude {
    pub use crate::core::{EnsemblePoint, Measurements, ModelSource, Variable, WeatherObservation};
    pub use crate::ensemble::{EnsembleConfig, EnsembleEngine, EnsembleResult, WeightTable};
    pub use crate::error::{EnsembleError, Result};
    pub use crate::report::{EnsembleReport, ReportOptions};
    pub use crate::sources::{PayloadMetadata, SourcePayload};
}
