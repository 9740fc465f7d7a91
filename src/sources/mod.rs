//! Source payload schemas and the standardizer.
//!
//! Each provider publishes its points under its own key and with its own
//! field names. This module validates the envelope, decodes each point with
//! the matching schema and produces [`WeatherObservation`](crate::core::WeatherObservation)
//! records.

mod payload;
mod schema;
mod standardize;

pub use payload::{PayloadMetadata, SourcePayload};
pub use schema::{AifsPoint, CanonicalPoint, PointSchema};
pub use standardize::{parse_timestamp, standardize, Standardized};
