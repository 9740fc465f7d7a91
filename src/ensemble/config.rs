//! Ensemble configuration.

use crate::ensemble::WeightTable;
use crate::error::{EnsembleError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Largest accepted agreement window, one week.
pub const MAX_AGREEMENT_WINDOW_SECS: i64 = 7 * 24 * 3600;

/// Configuration for [`EnsembleEngine`](crate::ensemble::EnsembleEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Per-source fusion weights.
    pub weights: WeightTable,
    /// Maximum time distance, in seconds, for two forecasts to be compared.
    pub agreement_window_secs: i64,
    /// Temperature difference at which agreement reaches zero.
    pub agreement_scale: f64,
    /// Whether a historical payload is fused when supplied.
    pub include_historical: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            agreement_window_secs: 3600,
            agreement_scale: 10.0,
            include_historical: true,
        }
    }
}

impl EnsembleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_agreement_window(mut self, window: Duration) -> Self {
        self.agreement_window_secs = window.num_seconds();
        self
    }

    pub fn with_agreement_scale(mut self, scale: f64) -> Self {
        self.agreement_scale = scale;
        self
    }

    pub fn with_historical(mut self, include: bool) -> Self {
        self.include_historical = include;
        self
    }

    /// Agreement window, clamped to `0..=MAX_AGREEMENT_WINDOW_SECS`.
    pub fn agreement_window(&self) -> Duration {
        Duration::seconds(self.agreement_window_secs.clamp(0, MAX_AGREEMENT_WINDOW_SECS))
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EnsembleError::InvalidParameter(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.agreement_window_secs <= 0
            || self.agreement_window_secs > MAX_AGREEMENT_WINDOW_SECS
        {
            return Err(EnsembleError::InvalidParameter(format!(
                "agreement window must be in 1..={}s, got {}s",
                MAX_AGREEMENT_WINDOW_SECS, self.agreement_window_secs
            )));
        }
        if !self.agreement_scale.is_finite() || self.agreement_scale <= 0.0 {
            return Err(EnsembleError::InvalidParameter(format!(
                "agreement scale must be positive, got {}",
                self.agreement_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModelSource;

    #[test]
    fn defaults_are_valid() {
        let config = EnsembleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agreement_window(), Duration::hours(1));
        assert_eq!(config.agreement_scale, 10.0);
        assert!(config.include_historical);
    }

    #[test]
    fn builder_overrides() {
        let config = EnsembleConfig::new()
            .with_weights(WeightTable::default().with_weight(ModelSource::Aifs, 0.6))
            .with_agreement_window(Duration::minutes(30))
            .with_agreement_scale(5.0)
            .with_historical(false);
        assert_eq!(config.weights.aifs, 0.6);
        assert_eq!(config.agreement_window_secs, 1800);
        assert_eq!(config.agreement_scale, 5.0);
        assert!(!config.include_historical);
    }

    #[test]
    fn out_of_range_window_is_clamped_when_read() {
        let mut config = EnsembleConfig::default();
        config.agreement_window_secs = i64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(config.agreement_window(), Duration::weeks(1));
    }

    #[test]
    fn from_json_merges_with_defaults() {
        let config =
            EnsembleConfig::from_json_str(r#"{"weights": {"graphcast": 0.5}, "agreement_scale": 8}"#)
                .unwrap();
        assert_eq!(config.weights.graphcast, 0.5);
        assert_eq!(config.weights.aifs, 0.4);
        assert_eq!(config.agreement_scale, 8.0);
        assert_eq!(config.agreement_window_secs, 3600);
    }

    #[test]
    fn from_json_rejects_invalid_values() {
        assert!(EnsembleConfig::from_json_str(r#"{"agreement_window_secs": 0}"#).is_err());
        assert!(EnsembleConfig::from_json_str(
            r#"{"agreement_window_secs": 9223372036854775807}"#
        )
        .is_err());
        assert!(EnsembleConfig::from_json_str(r#"{"agreement_window_secs": 604801}"#).is_err());
        assert!(EnsembleConfig::from_json_str(r#"{"agreement_window_secs": 604800}"#).is_ok());
        assert!(EnsembleConfig::from_json_str(r#"{"agreement_scale": -1}"#).is_err());
        assert!(EnsembleConfig::from_json_str(r#"{"weights": {"aifs": -2}}"#).is_err());
        assert!(EnsembleConfig::from_json_str("not json").is_err());
    }
}
