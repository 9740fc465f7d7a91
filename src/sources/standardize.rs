//! Conversion of raw source payloads into standardized observations.

use crate::core::{ModelSource, WeatherObservation, OBSERVATION_FORECAST_HOUR};
use crate::error::{EnsembleError, Result};
use crate::sources::payload::SourcePayload;
use crate::sources::schema::{AifsPoint, CanonicalPoint, PointSchema};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

/// Naive layouts accepted after RFC 3339 fails; interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Observations produced from one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    pub source: ModelSource,
    pub observations: Vec<WeatherObservation>,
    /// Points dropped because they could not be decoded.
    pub skipped: usize,
}

impl Standardized {
    pub fn empty(source: ModelSource) -> Self {
        Self {
            source,
            observations: Vec::new(),
            skipped: 0,
        }
    }

    /// True when at least one point was dropped.
    pub fn is_degraded(&self) -> bool {
        self.skipped > 0
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (`Z` or explicit offset) and offset-less timestamps,
/// which are taken to be UTC.
///
/// # Example
/// ```
/// use weather_ensemble::sources::parse_timestamp;
///
/// let a = parse_timestamp("2025-01-15T12:00:00Z").unwrap();
/// let b = parse_timestamp("2025-01-15T12:00:00").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(EnsembleError::TimestampError(format!(
        "unrecognized timestamp `{}`",
        raw
    )))
}

/// Standardize a payload using the schema of its source.
pub fn standardize(payload: &SourcePayload) -> Standardized {
    let standardized = match payload.source {
        ModelSource::Aifs => standardize_points::<AifsPoint>(payload),
        ModelSource::GraphCast | ModelSource::Eumetsat | ModelSource::Named(_) => {
            standardize_points::<CanonicalPoint>(payload)
        }
    };

    debug!(
        source = %payload.source,
        observations = standardized.len(),
        skipped = standardized.skipped,
        "standardized payload"
    );
    standardized
}

fn standardize_points<P: PointSchema>(payload: &SourcePayload) -> Standardized {
    let source = &payload.source;
    let mut out = Standardized::empty(source.clone());

    for (index, raw) in payload.points.iter().enumerate() {
        let point = match P::deserialize(raw) {
            Ok(point) => point,
            Err(e) => {
                warn!(%source, index, error = %e, "skipping malformed point");
                out.skipped += 1;
                continue;
            }
        };

        let timestamp = match parse_timestamp(point.time()) {
            Ok(ts) => ts,
            Err(e) => {
                warn!(%source, index, error = %e, "skipping point with bad timestamp");
                out.skipped += 1;
                continue;
            }
        };

        let forecast_hour = if source.is_observational() {
            OBSERVATION_FORECAST_HOUR
        } else {
            point.forecast_hour().unwrap_or(index as i64)
        };

        out.observations.push(WeatherObservation::new(
            timestamp,
            point.measurements(),
            source.clone(),
            forecast_hour,
        ));
    }

    out
}
