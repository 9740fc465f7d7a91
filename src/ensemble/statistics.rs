//! Coverage, temporal range and inter-model agreement.

use crate::core::{Variable, WeatherObservation};
use crate::utils::{mean, population_std_dev, round_to};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const AGREEMENT_DIGITS: i32 = 3;

/// Number of standardized points per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelCoverage {
    pub aifs_points: usize,
    pub graphcast_points: usize,
    pub eumetsat_points: usize,
}

/// Earliest and latest timestamp across all sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemporalRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_hours: f64,
}

/// Temperature agreement between the two forecast models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgreementQuality {
    /// Mean pairwise agreement in `[0, 1]`.
    pub model_agreement: f64,
    /// Population standard deviation of the pairwise scores.
    pub agreement_consistency: f64,
    /// Number of compared pairs.
    pub pair_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsStatus {
    Complete,
    FallbackMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleStatistics {
    pub status: StatisticsStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_coverage: Option<ModelCoverage>,
    /// Absent when there are no observations at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_range: Option<TemporalRange>,
    /// Absent when no forecast pair could be compared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensemble_quality: Option<AgreementQuality>,
}

impl EnsembleStatistics {
    /// Placeholder statistics for a degraded result.
    pub fn fallback() -> Self {
        Self {
            status: StatisticsStatus::FallbackMode,
            model_coverage: None,
            temporal_range: None,
            ensemble_quality: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.status == StatisticsStatus::FallbackMode
    }
}

/// Agreement of two temperatures: 1 when equal, decaying linearly to 0 at `scale` degrees apart.
///
/// # Example
/// ```
/// use weather_ensemble::ensemble::agreement_score;
///
/// assert_eq!(agreement_score(20.0, 20.0, 10.0), 1.0);
/// assert_eq!(agreement_score(20.0, 25.0, 10.0), 0.5);
/// assert_eq!(agreement_score(20.0, 35.0, 10.0), 0.0);
/// ```
pub fn agreement_score(a: f64, b: f64, scale: f64) -> f64 {
    (1.0 - (a - b).abs() / scale).max(0.0)
}

/// Temporal range of all observations, or `None` if there are none.
pub fn temporal_range(sequences: &[&[WeatherObservation]]) -> Option<TemporalRange> {
    let mut timestamps = sequences.iter().flat_map(|s| s.iter().map(|o| o.timestamp));
    let first = timestamps.next()?;
    let (start, end) = timestamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));

    Some(TemporalRange {
        start,
        end,
        total_hours: (end - start).num_milliseconds() as f64 / 3_600_000.0,
    })
}

/// Mean and spread of temperature agreement over every pair of points from
/// the two forecast models lying within `window` of each other.
///
/// Returns `None` when no such pair reports temperature on both sides.
pub fn model_agreement(
    primary: &[WeatherObservation],
    secondary: &[WeatherObservation],
    window: Duration,
    scale: f64,
) -> Option<AgreementQuality> {
    let mut others: Vec<(DateTime<Utc>, f64)> = secondary
        .iter()
        .filter_map(|o| o.value(Variable::Temperature).map(|t| (o.timestamp, t)))
        .collect();
    others.sort_by_key(|(ts, _)| *ts);

    let mut scores = Vec::new();
    for obs in primary {
        let Some(temp) = obs.value(Variable::Temperature) else {
            continue;
        };
        let (start, end) = window_bounds(obs.timestamp, window);
        let lo = others.partition_point(|(ts, _)| *ts < start);
        let hi = others.partition_point(|(ts, _)| *ts <= end);
        scores.extend(
            others[lo..hi]
                .iter()
                .map(|(_, other)| agreement_score(temp, *other, scale)),
        );
    }

    if scores.is_empty() {
        return None;
    }

    Some(AgreementQuality {
        model_agreement: round_to(mean(&scores), AGREEMENT_DIGITS),
        agreement_consistency: round_to(population_std_dev(&scores), AGREEMENT_DIGITS),
        pair_count: scores.len(),
    })
}

/// `[center - window, center + window]`, saturating at the representable range.
fn window_bounds(center: DateTime<Utc>, window: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = center
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let end = center
        .checked_add_signed(window)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

/// Compute all statistics for the three standardized sequences.
pub fn compute_statistics(
    aifs: &[WeatherObservation],
    graphcast: &[WeatherObservation],
    eumetsat: &[WeatherObservation],
    window: Duration,
    scale: f64,
) -> EnsembleStatistics {
    EnsembleStatistics {
        status: StatisticsStatus::Complete,
        model_coverage: Some(ModelCoverage {
            aifs_points: aifs.len(),
            graphcast_points: graphcast.len(),
            eumetsat_points: eumetsat.len(),
        }),
        temporal_range: temporal_range(&[aifs, graphcast, eumetsat]),
        ensemble_quality: model_agreement(aifs, graphcast, window, scale),
    }
}
