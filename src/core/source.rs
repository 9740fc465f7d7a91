//! Identifiers for the prediction sources feeding the ensemble.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A prediction provider.
///
/// The three built-in providers have dedicated variants; any other provider
/// is carried by name and receives the default weight unless overridden.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelSource {
    /// ECMWF Artificial Intelligence Forecasting System.
    Aifs,
    /// Google DeepMind GraphCast (served through a third-party API).
    GraphCast,
    /// EUMETSAT satellite-derived historical observations.
    Eumetsat,
    /// Any other named provider.
    Named(String),
}

impl ModelSource {
    /// Display name used in results and reports.
    pub fn name(&self) -> &str {
        match self {
            ModelSource::Aifs => "AIFS",
            ModelSource::GraphCast => "GraphCast",
            ModelSource::Eumetsat => "EUMETSAT",
            ModelSource::Named(name) => name,
        }
    }

    /// Static reliability assigned to every observation from this source.
    ///
    /// Observational data is ground truth rather than prediction and so
    /// ranks highest.
    pub fn base_confidence(&self) -> f64 {
        match self {
            ModelSource::Aifs => 0.9,
            ModelSource::GraphCast => 0.85,
            ModelSource::Eumetsat => 1.0,
            ModelSource::Named(_) => 0.8,
        }
    }

    /// Whether this source reports observations rather than forecasts.
    pub fn is_observational(&self) -> bool {
        matches!(self, ModelSource::Eumetsat)
    }
}

impl From<&str> for ModelSource {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "aifs" => ModelSource::Aifs,
            "graphcast" => ModelSource::GraphCast,
            "eumetsat" => ModelSource::Eumetsat,
            _ => ModelSource::Named(name.to_string()),
        }
    }
}

impl From<String> for ModelSource {
    fn from(name: String) -> Self {
        ModelSource::from(name.as_str())
    }
}

impl From<ModelSource> for String {
    fn from(source: ModelSource) -> Self {
        source.name().to_string()
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_parse_case_insensitively() {
        assert_eq!(ModelSource::from("aifs"), ModelSource::Aifs);
        assert_eq!(ModelSource::from("GraphCast"), ModelSource::GraphCast);
        assert_eq!(ModelSource::from("EUMETSAT"), ModelSource::Eumetsat);
        assert_eq!(
            ModelSource::from("icon"),
            ModelSource::Named("icon".to_string())
        );
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&ModelSource::GraphCast).unwrap();
        assert_eq!(json, "\"GraphCast\"");

        let back: ModelSource = serde_json::from_str("\"EUMETSAT\"").unwrap();
        assert_eq!(back, ModelSource::Eumetsat);
    }

    #[test]
    fn observational_data_has_highest_confidence() {
        assert_eq!(ModelSource::Eumetsat.base_confidence(), 1.0);
        assert!(ModelSource::Aifs.base_confidence() > ModelSource::GraphCast.base_confidence());
        assert!(ModelSource::Eumetsat.is_observational());
        assert!(!ModelSource::Aifs.is_observational());
    }
}
