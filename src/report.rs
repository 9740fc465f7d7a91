//! Plain-text rendering of ensemble results for end users.

use crate::core::{ModelSource, Variable};
use crate::ensemble::{EnsembleResult, FusionStatus, ModelComparison};
use std::fmt;

const RULE: &str = "==========================================";

/// Rendering options for [`EnsembleReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Location shown in the header, as (latitude, longitude).
    pub location: Option<(f64, f64)>,
    /// Number of forecast points listed.
    pub highlights: usize,
    /// Number of recommendations listed.
    pub insights: usize,
    /// Whether the historical point count is listed.
    pub show_historical: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            location: None,
            highlights: 5,
            insights: 3,
            show_historical: true,
        }
    }
}

impl ReportOptions {
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    pub fn with_highlights(mut self, n: usize) -> Self {
        self.highlights = n;
        self
    }
}

/// Human-readable summary of an [`EnsembleResult`].
///
/// # Example
/// ```
/// use weather_ensemble::ensemble::EnsembleEngine;
/// use weather_ensemble::report::{EnsembleReport, ReportOptions};
/// use serde_json::json;
///
/// let result = EnsembleEngine::default().create_ensemble_from_json(
///     &json!({"forecast_data": []}),
///     &json!({"hourly_data": []}),
///     None,
/// );
/// let text = EnsembleReport::new(&result, ReportOptions::default()).to_string();
/// assert!(text.contains("Points: 0"));
/// ```
pub struct EnsembleReport<'a> {
    result: &'a EnsembleResult,
    options: ReportOptions,
}

impl<'a> EnsembleReport<'a> {
    pub fn new(result: &'a EnsembleResult, options: ReportOptions) -> Self {
        Self { result, options }
    }
}

impl fmt::Display for EnsembleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let meta = &result.metadata;

        match self.options.location {
            Some((lat, lon)) => writeln!(f, "Ensemble Weather Forecast for {}°, {}°", lat, lon)?,
            None => writeln!(f, "Ensemble Weather Forecast")?,
        }
        writeln!(f, "{}\n", RULE)?;

        writeln!(f, "MULTI-MODEL ENSEMBLE PREDICTION")?;
        let models: Vec<&str> = meta.models_used.iter().map(ModelSource::name).collect();
        writeln!(f, "Models: {}", models.join(", "))?;
        writeln!(f, "Method: {}", meta.ensemble_method.as_str())?;
        writeln!(f, "Points: {}", meta.forecast_points)?;
        match &meta.status {
            FusionStatus::Complete => {}
            FusionStatus::Partial { skipped_points } => {
                writeln!(f, "Warning: {} input points were skipped", skipped_points)?
            }
            FusionStatus::Fallback { reason } => {
                writeln!(f, "Warning: ensemble unavailable ({})", reason)?
            }
        }

        if !result.ensemble_forecast.is_empty() {
            writeln!(f, "\nENSEMBLE FORECAST HIGHLIGHTS:")?;
            for point in result.ensemble_forecast.iter().take(self.options.highlights) {
                let temp = match point.value(Variable::Temperature) {
                    Some(t) => format!("{}{}", t, Variable::Temperature.unit()),
                    None => "N/A".to_string(),
                };
                let spread = point
                    .uncertainty(Variable::Temperature)
                    .map(|u| format!(" ±{:.2}", u))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "  {}: {}{} (conf: {:.2}, models: {})",
                    point.time.format("%Y-%m-%d %H:%M"),
                    temp,
                    spread,
                    point.confidence,
                    point.prediction_count
                )?;
            }
        }

        let recommendations = &result.model_comparison.recommendations;
        if !recommendations.is_empty() {
            writeln!(f, "\nKEY INSIGHTS:")?;
            for rec in recommendations.iter().take(self.options.insights) {
                writeln!(f, "  - {}", rec)?;
            }
        }

        let stats = &result.ensemble_statistics;
        if let Some(coverage) = &stats.model_coverage {
            writeln!(f, "\nDATA COVERAGE:")?;
            writeln!(f, "  AIFS: {} points", coverage.aifs_points)?;
            writeln!(f, "  GraphCast: {} points", coverage.graphcast_points)?;
            if self.options.show_historical {
                writeln!(f, "  EUMETSAT: {} points", coverage.eumetsat_points)?;
            }
        }

        if let Some(quality) = &stats.ensemble_quality {
            writeln!(
                f,
                "\nModel Agreement: {:.1}%",
                quality.model_agreement * 100.0
            )?;
        }

        Ok(())
    }
}

/// Human-readable side-by-side comparison of the two forecast models.
pub struct ComparisonReport<'a> {
    comparison: &'a ModelComparison,
    aifs_points: usize,
    graphcast_points: usize,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(comparison: &'a ModelComparison, aifs_points: usize, graphcast_points: usize) -> Self {
        Self {
            comparison,
            aifs_points,
            graphcast_points,
        }
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.comparison;
        writeln!(f, "AI Model Comparison: AIFS vs GraphCast")?;
        writeln!(f, "{}\n", RULE)?;

        writeln!(f, "MODEL CHARACTERISTICS:")?;
        for (source, chars) in &c.model_characteristics {
            writeln!(
                f,
                "{:<10} {} | {} | {}",
                format!("{}:", source),
                chars.resolution,
                chars.strength,
                chars.provider
            )?;
        }

        let perf = &c.performance_comparison;
        writeln!(f, "\nPERFORMANCE COMPARISON:")?;
        for (label, table) in [
            ("Accuracy", &perf.accuracy),
            ("Speed", &perf.speed),
            ("Coverage", &perf.coverage),
        ] {
            for (i, (source, note)) in table.iter().enumerate() {
                let head = if i == 0 { format!("{}:", label) } else { String::new() };
                writeln!(f, "{:<10} {}: {}", head, source, note)?;
            }
        }

        writeln!(f, "\nRECOMMENDATIONS:")?;
        for rec in &c.recommendations {
            writeln!(f, "  - {}", rec)?;
        }

        writeln!(f, "\nData comparison:")?;
        writeln!(f, "  AIFS points: {}", self.aifs_points)?;
        writeln!(f, "  GraphCast points: {}", self.graphcast_points)
    }
}
