//! Typed point schemas, one per source field-naming convention.

use crate::core::Measurements;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A source-specific point shape that can be mapped to canonical measurements.
pub trait PointSchema: DeserializeOwned {
    /// Raw ISO 8601 timestamp.
    fn time(&self) -> &str;

    /// Canonical measurements carried by the point.
    fn measurements(&self) -> Measurements;

    /// Forecast horizon reported by the source, if any.
    fn forecast_hour(&self) -> Option<i64> {
        None
    }
}

/// Accept integral or fractional forecast hours; fractions truncate toward zero.
fn lenient_hour<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let hour = Option::<f64>::deserialize(deserializer)?;
    Ok(hour.filter(|h| h.is_finite()).map(|h| h.trunc() as i64))
}

/// AIFS point (ECMWF variable naming, 6-hourly).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AifsPoint {
    pub time: String,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub surface_pressure: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub precipitation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_hour")]
    pub forecast_hour: Option<i64>,
}

impl PointSchema for AifsPoint {
    fn time(&self) -> &str {
        &self.time
    }

    fn measurements(&self) -> Measurements {
        Measurements {
            temperature: self.temperature_2m,
            humidity: self.relative_humidity_2m,
            pressure: self.surface_pressure,
            wind_speed: self.wind_speed_10m,
            wind_direction: self.wind_direction_10m,
            precipitation: self.precipitation,
        }
    }

    fn forecast_hour(&self) -> Option<i64> {
        self.forecast_hour
    }
}

/// Point already using canonical field names.
///
/// Used by the GraphCast hourly feed, the EUMETSAT historical feed and any
/// other named provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CanonicalPoint {
    pub time: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_hour")]
    pub forecast_hour: Option<i64>,
}

impl PointSchema for CanonicalPoint {
    fn time(&self) -> &str {
        &self.time
    }

    fn measurements(&self) -> Measurements {
        Measurements {
            temperature: self.temperature,
            humidity: self.humidity,
            pressure: self.pressure,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            precipitation: self.precipitation,
        }
    }

    fn forecast_hour(&self) -> Option<i64> {
        self.forecast_hour
    }
}
