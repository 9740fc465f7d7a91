//! Temporal alignment of observations into hourly buckets.
//!
//! Each timestamp is truncated to the start of its hour, so 12:00:00 and
//! 12:59:59 share a bucket while 12:59:59 and 13:00:01 do not.

use crate::core::WeatherObservation;
use crate::error::{EnsembleError, Result};
use chrono::{DateTime, Timelike, Utc};
use std::collections::BTreeMap;

/// Observations from every source sharing one truncated hour.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBucket {
    pub hour: DateTime<Utc>,
    /// Observations in source order, then in their original sequence order.
    pub observations: Vec<WeatherObservation>,
}

impl TimeBucket {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Truncate a timestamp to the start of its hour.
pub fn truncate_to_hour(timestamp: DateTime<Utc>) -> Result<DateTime<Utc>> {
    timestamp
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| {
            EnsembleError::TimestampError(format!("cannot truncate {} to the hour", timestamp))
        })
}

/// Group observation sequences into hourly buckets, ascending by hour.
///
/// Only non-empty buckets are produced.
pub fn align(sequences: &[&[WeatherObservation]]) -> Result<Vec<TimeBucket>> {
    let mut groups: BTreeMap<DateTime<Utc>, Vec<WeatherObservation>> = BTreeMap::new();

    for observation in sequences.iter().flat_map(|seq| seq.iter()) {
        let hour = truncate_to_hour(observation.timestamp)?;
        groups.entry(hour).or_default().push(observation.clone());
    }

    Ok(groups
        .into_iter()
        .map(|(hour, observations)| TimeBucket { hour, observations })
        .collect())
}
