//! Standardized weather observation records.

use crate::core::ModelSource;
use crate::error::{EnsembleError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Forecast hour assigned to historical/observational records.
pub const OBSERVATION_FORECAST_HOUR: i64 = -1;

/// Canonical measurement variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    WindDirection,
    Precipitation,
}

impl Variable {
    /// All canonical variables, in output order.
    pub const ALL: [Variable; 6] = [
        Variable::Temperature,
        Variable::Humidity,
        Variable::Pressure,
        Variable::WindSpeed,
        Variable::WindDirection,
        Variable::Precipitation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variable::Temperature => "temperature",
            Variable::Humidity => "humidity",
            Variable::Pressure => "pressure",
            Variable::WindSpeed => "wind_speed",
            Variable::WindDirection => "wind_direction",
            Variable::Precipitation => "precipitation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Temperature => "°C",
            Variable::Humidity => "%",
            Variable::Pressure => "hPa",
            Variable::WindSpeed => "km/h",
            Variable::WindDirection => "°",
            Variable::Precipitation => "mm",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six canonical measurements; each is absent when the source did not report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation: Option<f64>,
}

impl Measurements {
    /// Get the value of a single variable.
    pub fn get(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::Temperature => self.temperature,
            Variable::Humidity => self.humidity,
            Variable::Pressure => self.pressure,
            Variable::WindSpeed => self.wind_speed,
            Variable::WindDirection => self.wind_direction,
            Variable::Precipitation => self.precipitation,
        }
    }

    /// Set the value of a single variable.
    pub fn set(&mut self, variable: Variable, value: Option<f64>) {
        let slot = match variable {
            Variable::Temperature => &mut self.temperature,
            Variable::Humidity => &mut self.humidity,
            Variable::Pressure => &mut self.pressure,
            Variable::WindSpeed => &mut self.wind_speed,
            Variable::WindDirection => &mut self.wind_direction,
            Variable::Precipitation => &mut self.precipitation,
        };
        *slot = value;
    }

    /// Builder-style setter.
    pub fn with(mut self, variable: Variable, value: f64) -> Self {
        self.set(variable, Some(value));
        self
    }

    /// True when no variable is present.
    pub fn is_empty(&self) -> bool {
        Variable::ALL.iter().all(|v| self.get(*v).is_none())
    }

    /// Iterate over the variables that are present.
    pub fn present(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        Variable::ALL
            .iter()
            .filter_map(move |v| self.get(*v).map(|value| (*v, value)))
    }
}

/// A single standardized weather record from one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    /// Absolute time of the record.
    pub timestamp: DateTime<Utc>,
    /// Reported measurements.
    pub measurements: Measurements,
    /// Provider of the record.
    pub source: ModelSource,
    /// Offset from forecast issuance; [`OBSERVATION_FORECAST_HOUR`] for observations.
    pub forecast_hour: i64,
    confidence: f64,
}

impl WeatherObservation {
    /// Create an observation carrying the source's base confidence.
    pub fn new(
        timestamp: DateTime<Utc>,
        measurements: Measurements,
        source: ModelSource,
        forecast_hour: i64,
    ) -> Self {
        let confidence = source.base_confidence();
        Self {
            timestamp,
            measurements,
            source,
            forecast_hour,
            confidence,
        }
    }

    /// Override the confidence. Must lie in `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(EnsembleError::InvalidParameter(format!(
                "confidence must be in [0, 1], got {}",
                confidence
            )));
        }
        self.confidence = confidence;
        Ok(self)
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Shorthand for `measurements.get(variable)`.
    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.measurements.get(variable)
    }
}
