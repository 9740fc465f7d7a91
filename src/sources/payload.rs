//! Raw payload envelopes as delivered by the source adapters.
//!
//! Every adapter returns `{ <points-key>: [ ... ], metadata: { is_mock, ... } }`.
//! Only the envelope is validated here; individual points are decoded by the
//! standardizer so that one bad point cannot sink the whole payload.

use crate::core::ModelSource;
use crate::error::{EnsembleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Adapter-supplied metadata. Only `is_mock` drives behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadMetadata {
    /// Whether the adapter produced synthetic data. Absent means mock.
    #[serde(default = "default_is_mock")]
    pub is_mock: bool,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

fn default_is_mock() -> bool {
    true
}

impl Default for PayloadMetadata {
    fn default() -> Self {
        Self {
            is_mock: true,
            model: None,
            provider: None,
            resolution: None,
        }
    }
}

impl PayloadMetadata {
    /// Metadata for a live (non-mock) source.
    pub fn live() -> Self {
        Self {
            is_mock: false,
            ..Default::default()
        }
    }

    /// Metadata for a mock source.
    pub fn mock() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        !self.is_mock
    }

    /// Read the `metadata` object of a raw payload, tolerating any shape.
    ///
    /// `is_mock` is read on its own; descriptive fields of an unexpected
    /// type are dropped without affecting it.
    pub fn from_payload(value: &Value) -> Self {
        let raw = match value.get("metadata") {
            None | Some(Value::Null) => return Self::default(),
            Some(Value::Object(raw)) => raw,
            Some(other) => {
                warn!(metadata = %other, "payload metadata is not an object, treating source as mock");
                return Self::default();
            }
        };

        let is_mock = match raw.get("is_mock") {
            None | Some(Value::Null) => default_is_mock(),
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                warn!(is_mock = %other, "non-boolean is_mock, treating source as mock");
                default_is_mock()
            }
        };
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            is_mock,
            model: text("model"),
            provider: text("provider"),
            resolution: text("resolution"),
        }
    }
}

/// A source's raw point list plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePayload {
    pub source: ModelSource,
    pub points: Vec<Value>,
    pub metadata: PayloadMetadata,
}

impl SourcePayload {
    pub fn new(source: ModelSource, points: Vec<Value>, metadata: PayloadMetadata) -> Self {
        Self {
            source,
            points,
            metadata,
        }
    }

    /// A payload with no points and mock metadata.
    pub fn empty(source: ModelSource) -> Self {
        Self::new(source, Vec::new(), PayloadMetadata::default())
    }

    /// Keys under which a source publishes its point list, in lookup order.
    pub fn points_keys(source: &ModelSource) -> &'static [&'static str] {
        match source {
            ModelSource::Aifs => &["forecast_data"],
            ModelSource::GraphCast => &["hourly_data"],
            ModelSource::Eumetsat => &["observations", "historical_data"],
            ModelSource::Named(_) => &["points"],
        }
    }

    /// Validate a raw payload envelope.
    ///
    /// A missing points key yields zero points. A payload that is not an
    /// object, or whose points key holds something other than an array, is
    /// rejected.
    pub fn from_value(source: ModelSource, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            EnsembleError::invalid_payload(&source, "payload is not a JSON object")
        })?;

        let keys = Self::points_keys(&source);
        let points = match keys.iter().find_map(|k| object.get(*k).map(|v| (*k, v))) {
            None => {
                debug!(%source, expected = ?keys, "payload has no points key, using zero points");
                Vec::new()
            }
            Some((_, Value::Null)) => Vec::new(),
            Some((_, Value::Array(items))) => items.clone(),
            Some((key, _)) => {
                return Err(EnsembleError::invalid_payload(
                    &source,
                    format!("`{}` is not an array", key),
                ))
            }
        };

        Ok(Self {
            metadata: PayloadMetadata::from_payload(value),
            source,
            points,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_points_under_source_specific_key() {
        let raw = json!({
            "forecast_data": [{"time": "2025-01-15T12:00:00Z"}],
            "metadata": {"is_mock": false, "model": "AIFS Single v1.0"}
        });
        let payload = SourcePayload::from_value(ModelSource::Aifs, &raw).unwrap();
        assert_eq!(payload.len(), 1);
        assert!(payload.metadata.is_live());
        assert_eq!(payload.metadata.model.as_deref(), Some("AIFS Single v1.0"));
    }

    #[test]
    fn historical_payload_accepts_both_keys() {
        let a = json!({"observations": [{}, {}]});
        let b = json!({"historical_data": [{}]});
        assert_eq!(SourcePayload::from_value(ModelSource::Eumetsat, &a).unwrap().len(), 2);
        assert_eq!(SourcePayload::from_value(ModelSource::Eumetsat, &b).unwrap().len(), 1);
    }

    #[test]
    fn missing_points_key_means_zero_points() {
        let raw = json!({"metadata": {"is_mock": false}});
        let payload = SourcePayload::from_value(ModelSource::GraphCast, &raw).unwrap();
        assert!(payload.is_empty());
        assert!(payload.metadata.is_live());
    }

    #[test]
    fn non_array_points_are_rejected() {
        let raw = json!({"hourly_data": "nope"});
        let err = SourcePayload::from_value(ModelSource::GraphCast, &raw).unwrap_err();
        assert!(matches!(err, EnsembleError::InvalidPayload { .. }));

        let err = SourcePayload::from_value(ModelSource::Aifs, &json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn metadata_defaults_to_mock() {
        assert!(PayloadMetadata::from_payload(&json!({})).is_mock);
        assert!(PayloadMetadata::from_payload(&json!({"metadata": {}})).is_mock);
        assert!(PayloadMetadata::from_payload(&json!({"metadata": "bogus"})).is_mock);
        assert!(!PayloadMetadata::from_payload(&json!({"metadata": {"is_mock": false}})).is_mock);
        assert!(PayloadMetadata::from_payload(&json!({"metadata": {"is_mock": "no"}})).is_mock);
    }

    #[test]
    fn mistyped_descriptive_fields_keep_live_flag() {
        let meta = PayloadMetadata::from_payload(&json!({
            "metadata": {"is_mock": false, "resolution": 0.25, "model": 5, "provider": "ECMWF"}
        }));
        assert!(meta.is_live());
        assert_eq!(meta.resolution, None);
        assert_eq!(meta.model, None);
        assert_eq!(meta.provider.as_deref(), Some("ECMWF"));
    }
}
