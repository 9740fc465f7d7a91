//! Weighted fusion of one time bucket into an [`EnsemblePoint`].

use crate::core::{EnsemblePoint, Variable, WeatherObservation};
use crate::ensemble::{TimeBucket, WeightTable};
use crate::error::{EnsembleError, Result};
use crate::utils::{mean, population_std_dev, round_to, weighted_mean};
use std::collections::BTreeMap;

/// Decimal digits kept on fused values and uncertainties.
const VALUE_DIGITS: i32 = 2;
/// Decimal digits kept on point confidence.
const CONFIDENCE_DIGITS: i32 = 3;

/// Fuse a bucket.
///
/// For each variable, the fused value is the weighted mean of the reported
/// values, each weighted by `source weight * observation confidence` and
/// renormalized over the observations present. Uncertainty is the population
/// standard deviation of the raw values and is only reported when at least
/// two observations carry the variable.
///
/// Returns an error if a non-finite value reaches the output.
pub fn fuse_bucket(bucket: &TimeBucket, weights: &WeightTable) -> Result<EnsemblePoint> {
    let observations = &bucket.observations;
    let Some(first) = observations.first() else {
        return Ok(EnsemblePoint::empty(bucket.hour));
    };

    let mut values = BTreeMap::new();
    let mut uncertainty = BTreeMap::new();

    for variable in Variable::ALL {
        let (raw, w): (Vec<f64>, Vec<f64>) = observations
            .iter()
            .filter_map(|o| o.value(variable).map(|v| (v, weights.effective_weight(o))))
            .unzip();

        if raw.is_empty() {
            continue;
        }

        let fused = round_to(weighted_mean(&raw, &w), VALUE_DIGITS);
        ensure_finite(variable, "value", fused)?;
        values.insert(variable, fused);

        if raw.len() >= 2 {
            let spread = round_to(population_std_dev(&raw), VALUE_DIGITS);
            ensure_finite(variable, "uncertainty", spread)?;
            uncertainty.insert(variable, spread);
        }
    }

    let confidences: Vec<f64> = observations.iter().map(WeatherObservation::confidence).collect();
    let confidence = round_to(mean(&confidences), CONFIDENCE_DIGITS);

    let mut contributing_models = BTreeMap::new();
    for o in observations {
        *contributing_models.entry(o.source.clone()).or_insert(0) += 1;
    }

    Ok(EnsemblePoint {
        time: first.timestamp,
        bucket: bucket.hour,
        values,
        uncertainty,
        confidence,
        contributing_models,
        prediction_count: observations.len(),
    })
}

fn ensure_finite(variable: Variable, what: &str, x: f64) -> Result<()> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(EnsembleError::ComputationError(format!(
            "non-finite fused {} for {}",
            what, variable
        )))
    }
}
