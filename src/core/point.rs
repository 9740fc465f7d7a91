//! Fused ensemble output for one aligned time bucket.

use crate::core::{ModelSource, Variable};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One fused prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsemblePoint {
    /// Timestamp of the first observation in the bucket.
    pub time: DateTime<Utc>,
    /// Hour the bucket is aligned to.
    pub bucket: DateTime<Utc>,
    /// Weighted ensemble value per variable (only variables with data).
    pub values: BTreeMap<Variable, f64>,
    /// Spread across sources, only for variables reported by 2+ observations.
    pub uncertainty: BTreeMap<Variable, f64>,
    /// Mean confidence of the contributing observations.
    pub confidence: f64,
    /// Number of observations per source.
    pub contributing_models: BTreeMap<ModelSource, usize>,
    /// Total observations in the bucket.
    pub prediction_count: usize,
}

impl EnsemblePoint {
    /// Degenerate point for an empty bucket.
    pub fn empty(bucket: DateTime<Utc>) -> Self {
        Self {
            time: bucket,
            bucket,
            values: BTreeMap::new(),
            uncertainty: BTreeMap::new(),
            confidence: 0.0,
            contributing_models: BTreeMap::new(),
            prediction_count: 0,
        }
    }

    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.values.get(&variable).copied()
    }

    pub fn uncertainty(&self, variable: Variable) -> Option<f64> {
        self.uncertainty.get(&variable).copied()
    }

    /// Number of distinct sources in the bucket.
    pub fn model_count(&self) -> usize {
        self.contributing_models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prediction_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_point_has_no_values() {
        let t = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let point = EnsemblePoint::empty(t);
        assert!(point.is_empty());
        assert_eq!(point.model_count(), 0);
        assert_eq!(point.value(Variable::Temperature), None);
        assert_eq!(point.uncertainty(Variable::Temperature), None);
    }

    #[test]
    fn serializes_variables_and_sources_as_keys() {
        let t = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let mut point = EnsemblePoint::empty(t);
        point.values.insert(Variable::Temperature, 22.77);
        point.contributing_models.insert(ModelSource::Aifs, 1);
        point.prediction_count = 1;

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["values"]["temperature"], 22.77);
        assert_eq!(json["contributing_models"]["AIFS"], 1);
    }
}
