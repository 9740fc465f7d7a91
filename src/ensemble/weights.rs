//! Per-source ensemble weights.

use crate::core::{ModelSource, WeatherObservation};
use crate::error::{EnsembleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight applied to providers without an explicit entry.
pub const DEFAULT_SOURCE_WEIGHT: f64 = 0.33;

/// Static weight of each source in the fusion.
///
/// Weights are relative; they are renormalized within each time bucket over
/// the sources actually present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub aifs: f64,
    pub graphcast: f64,
    pub eumetsat: f64,
    /// Weight for named providers missing from `named`.
    pub default_weight: f64,
    /// Overrides for named providers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub named: BTreeMap<String, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            aifs: 0.4,
            graphcast: 0.35,
            eumetsat: 0.25,
            default_weight: DEFAULT_SOURCE_WEIGHT,
            named: BTreeMap::new(),
        }
    }
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of a single source.
    pub fn with_weight(mut self, source: ModelSource, weight: f64) -> Self {
        match source {
            ModelSource::Aifs => self.aifs = weight,
            ModelSource::GraphCast => self.graphcast = weight,
            ModelSource::Eumetsat => self.eumetsat = weight,
            ModelSource::Named(name) => {
                self.named.insert(name, weight);
            }
        }
        self
    }

    /// Set the fallback weight for unknown providers.
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = weight;
        self
    }

    /// Weight of a source.
    pub fn weight_for(&self, source: &ModelSource) -> f64 {
        match source {
            ModelSource::Aifs => self.aifs,
            ModelSource::GraphCast => self.graphcast,
            ModelSource::Eumetsat => self.eumetsat,
            ModelSource::Named(name) => self
                .named
                .get(name)
                .copied()
                .unwrap_or(self.default_weight),
        }
    }

    /// Source weight scaled by the observation's own confidence.
    pub fn effective_weight(&self, observation: &WeatherObservation) -> f64 {
        self.weight_for(&observation.source) * observation.confidence()
    }

    /// Check every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fixed = [
            ("aifs", self.aifs),
            ("graphcast", self.graphcast),
            ("eumetsat", self.eumetsat),
            ("default_weight", self.default_weight),
        ];
        let named = self.named.iter().map(|(k, v)| (k.as_str(), *v));

        for (name, weight) in fixed.into_iter().chain(named) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(EnsembleError::InvalidParameter(format!(
                    "weight for {} must be finite and non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}
