//! The ensemble orchestrator.
//!
//! Runs standardization, alignment, fusion, comparison and statistics in one
//! call. Any stage error is turned into a fallback result here; callers
//! always receive a well-formed [`EnsembleResult`].

use crate::core::{EnsemblePoint, ModelSource};
use crate::ensemble::{
    align, compare_models, compute_statistics, fuse_bucket, EnsembleConfig, EnsembleStatistics,
    ModelComparison, WeightTable,
};
use crate::error::Result;
use crate::sources::{standardize, PayloadMetadata, SourcePayload, Standardized};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// How the ensemble values were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsembleMethod {
    MultiModelWeighted,
    Fallback,
}

impl EnsembleMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnsembleMethod::MultiModelWeighted => "multi_model_weighted",
            EnsembleMethod::Fallback => "fallback",
        }
    }
}

/// Outcome of the pipeline, carried in the result metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FusionStatus {
    /// Every point of every payload was used.
    Complete,
    /// Fusion succeeded but some points were dropped during standardization.
    Partial { skipped_points: usize },
    /// Fusion failed; the forecast is empty.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleMetadata {
    pub ensemble_method: EnsembleMethod,
    pub models_used: Vec<ModelSource>,
    pub weights: WeightTable,
    pub generated_at: DateTime<Utc>,
    pub forecast_points: usize,
    pub status: FusionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Complete output of one ensemble request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleResult {
    pub ensemble_forecast: Vec<EnsemblePoint>,
    pub model_comparison: ModelComparison,
    pub ensemble_statistics: EnsembleStatistics,
    pub metadata: EnsembleMetadata,
}

impl EnsembleResult {
    pub fn is_fallback(&self) -> bool {
        matches!(self.metadata.status, FusionStatus::Fallback { .. })
    }

    /// True unless fusion used every input point.
    pub fn is_degraded(&self) -> bool {
        self.metadata.status != FusionStatus::Complete
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| {
            warn!(error = %e, "failed to serialize ensemble result");
            e.into()
        })
    }
}

/// Successful pipeline output before metadata is attached.
struct Fused {
    points: Vec<EnsemblePoint>,
    statistics: EnsembleStatistics,
    models_used: Vec<ModelSource>,
    skipped: usize,
}

/// Stateless ensemble builder. Holds only its configuration, so one engine
/// can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct EnsembleEngine {
    config: EnsembleConfig,
}

impl EnsembleEngine {
    /// Create an engine after validating the configuration.
    pub fn new(config: EnsembleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Build an ensemble forecast stamped with the current time.
    pub fn create_ensemble_forecast(
        &self,
        aifs: &SourcePayload,
        graphcast: &SourcePayload,
        historical: Option<&SourcePayload>,
    ) -> EnsembleResult {
        self.create_ensemble_forecast_at(aifs, graphcast, historical, Utc::now())
    }

    /// Build an ensemble forecast with an explicit generation time.
    ///
    /// Output is fully determined by the inputs, the configuration and
    /// `generated_at`.
    pub fn create_ensemble_forecast_at(
        &self,
        aifs: &SourcePayload,
        graphcast: &SourcePayload,
        historical: Option<&SourcePayload>,
        generated_at: DateTime<Utc>,
    ) -> EnsembleResult {
        info!(
            aifs_points = aifs.len(),
            graphcast_points = graphcast.len(),
            historical = historical.is_some(),
            "creating ensemble forecast"
        );

        let historical = match historical {
            Some(_) if !self.config.include_historical => {
                debug!("historical payload supplied but disabled by configuration");
                None
            }
            other => other,
        };

        let comparison = compare_models(&aifs.metadata, &graphcast.metadata);

        match self.run_pipeline(aifs, graphcast, historical) {
            Ok(fused) => {
                let status = if fused.skipped > 0 {
                    warn!(skipped = fused.skipped, "ensemble built from partial data");
                    FusionStatus::Partial {
                        skipped_points: fused.skipped,
                    }
                } else {
                    FusionStatus::Complete
                };

                EnsembleResult {
                    metadata: EnsembleMetadata {
                        ensemble_method: EnsembleMethod::MultiModelWeighted,
                        models_used: fused.models_used,
                        weights: self.config.weights.clone(),
                        generated_at,
                        forecast_points: fused.points.len(),
                        status,
                        note: None,
                    },
                    ensemble_forecast: fused.points,
                    model_comparison: comparison,
                    ensemble_statistics: fused.statistics,
                }
            }
            Err(e) => {
                error!(error = %e, "ensemble creation failed, using fallback");
                self.fallback(comparison, e.to_string(), generated_at)
            }
        }
    }

    /// Build an ensemble forecast from raw JSON payloads.
    ///
    /// A payload whose envelope cannot be read produces a fallback result;
    /// the model comparison is still computed from whatever metadata the raw
    /// payloads carry.
    pub fn create_ensemble_from_json(
        &self,
        aifs: &Value,
        graphcast: &Value,
        historical: Option<&Value>,
    ) -> EnsembleResult {
        self.create_ensemble_from_json_at(aifs, graphcast, historical, Utc::now())
    }

    pub fn create_ensemble_from_json_at(
        &self,
        aifs: &Value,
        graphcast: &Value,
        historical: Option<&Value>,
        generated_at: DateTime<Utc>,
    ) -> EnsembleResult {
        let parsed = SourcePayload::from_value(ModelSource::Aifs, aifs).and_then(|a| {
            let g = SourcePayload::from_value(ModelSource::GraphCast, graphcast)?;
            let h = historical
                .map(|h| SourcePayload::from_value(ModelSource::Eumetsat, h))
                .transpose()?;
            Ok((a, g, h))
        });

        match parsed {
            Ok((a, g, h)) => self.create_ensemble_forecast_at(&a, &g, h.as_ref(), generated_at),
            Err(e) => {
                error!(error = %e, "unreadable payload, using fallback");
                let comparison = compare_models(
                    &PayloadMetadata::from_payload(aifs),
                    &PayloadMetadata::from_payload(graphcast),
                );
                self.fallback(comparison, e.to_string(), generated_at)
            }
        }
    }

    fn run_pipeline(
        &self,
        aifs: &SourcePayload,
        graphcast: &SourcePayload,
        historical: Option<&SourcePayload>,
    ) -> Result<Fused> {
        let a = standardize(aifs);
        let g = standardize(graphcast);
        let h = historical
            .map(standardize)
            .unwrap_or_else(|| Standardized::empty(ModelSource::Eumetsat));

        let buckets = align(&[
            a.observations.as_slice(),
            g.observations.as_slice(),
            h.observations.as_slice(),
        ])?;
        debug!(buckets = buckets.len(), "aligned observations");

        let points = buckets
            .iter()
            .map(|bucket| fuse_bucket(bucket, &self.config.weights))
            .collect::<Result<Vec<_>>>()?;

        let statistics = compute_statistics(
            &a.observations,
            &g.observations,
            &h.observations,
            self.config.agreement_window(),
            self.config.agreement_scale,
        );

        let models_used = [&a, &g, &h]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.source.clone())
            .collect();

        Ok(Fused {
            points,
            statistics,
            models_used,
            skipped: a.skipped + g.skipped + h.skipped,
        })
    }

    fn fallback(
        &self,
        comparison: ModelComparison,
        reason: String,
        generated_at: DateTime<Utc>,
    ) -> EnsembleResult {
        EnsembleResult {
            ensemble_forecast: Vec::new(),
            model_comparison: comparison,
            ensemble_statistics: EnsembleStatistics::fallback(),
            metadata: EnsembleMetadata {
                ensemble_method: EnsembleMethod::Fallback,
                models_used: vec![ModelSource::Aifs, ModelSource::GraphCast],
                weights: self.config.weights.clone(),
                generated_at,
                forecast_points: 0,
                status: FusionStatus::Fallback { reason },
                note: Some("Fallback mode - check individual model outputs".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variable;
    use crate::ensemble::Availability;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 11, 0, 0).unwrap()
    }

    fn aifs_json() -> Value {
        json!({
            "forecast_data": [
                {"time": "2025-01-15T12:00:00Z", "temperature_2m": 22.5, "relative_humidity_2m": 65,
                 "surface_pressure": 1013.2, "wind_speed_10m": 8.5, "precipitation": 0.0, "forecast_hour": 0},
                {"time": "2025-01-15T18:00:00Z", "temperature_2m": 20.1, "relative_humidity_2m": 70,
                 "surface_pressure": 1012.8, "wind_speed_10m": 9.2, "precipitation": 0.2, "forecast_hour": 6}
            ],
            "metadata": {"is_mock": false}
        })
    }

    fn graphcast_json() -> Value {
        json!({
            "hourly_data": [
                {"time": "2025-01-15T12:00:00Z", "temperature": 23.1, "humidity": 63,
                 "pressure": 1013.5, "wind_speed": 8.8, "precipitation": 0.0},
                {"time": "2025-01-15T18:00:00Z", "temperature": 19.8, "humidity": 72,
                 "pressure": 1012.5, "wind_speed": 9.5, "precipitation": 0.1}
            ],
            "metadata": {"is_mock": false}
        })
    }

    fn engine() -> EnsembleEngine {
        EnsembleEngine::default()
    }

    #[test]
    fn fuses_two_live_models() {
        let result =
            engine().create_ensemble_from_json_at(&aifs_json(), &graphcast_json(), None, fixed_now());

        assert!(!result.is_degraded());
        assert_eq!(result.ensemble_forecast.len(), 2);
        assert_eq!(result.metadata.forecast_points, 2);
        assert_eq!(
            result.metadata.models_used,
            vec![ModelSource::Aifs, ModelSource::GraphCast]
        );
        assert_eq!(
            result.metadata.ensemble_method,
            EnsembleMethod::MultiModelWeighted
        );

        let noon = &result.ensemble_forecast[0];
        assert_eq!(noon.value(Variable::Temperature), Some(22.77));
        assert_eq!(noon.uncertainty(Variable::Temperature), Some(0.3));
        assert_eq!(result.model_comparison.availability, Availability::BothLive);

        let quality = result.ensemble_statistics.ensemble_quality.unwrap();
        assert_eq!(quality.pair_count, 2);
    }

    #[test]
    fn missing_points_key_is_zero_observations() {
        let broken = json!({"metadata": {"is_mock": false}});
        let result =
            engine().create_ensemble_from_json_at(&broken, &graphcast_json(), None, fixed_now());

        assert!(!result.is_fallback());
        assert_eq!(result.ensemble_forecast.len(), 2);
        assert_eq!(result.metadata.models_used, vec![ModelSource::GraphCast]);
        assert!(result.ensemble_statistics.ensemble_quality.is_none());
    }

    #[test]
    fn unreadable_payload_falls_back() {
        let broken = json!({"forecast_data": 42, "metadata": {"is_mock": false}});
        let result =
            engine().create_ensemble_from_json_at(&broken, &graphcast_json(), None, fixed_now());

        assert!(result.is_fallback());
        assert!(result.ensemble_forecast.is_empty());
        assert!(result.ensemble_statistics.is_fallback());
        assert_eq!(result.metadata.ensemble_method, EnsembleMethod::Fallback);
        assert!(result.metadata.note.is_some());
        // Comparison still reflects the raw metadata flags
        assert_eq!(result.model_comparison.availability, Availability::BothLive);
    }

    #[test]
    fn non_finite_input_falls_back() {
        let aifs = SourcePayload::from_value(ModelSource::Aifs, &aifs_json()).unwrap();
        let mut graphcast =
            SourcePayload::from_value(ModelSource::GraphCast, &graphcast_json()).unwrap();
        graphcast.metadata = PayloadMetadata::mock();

        // JSON cannot carry infinities; a huge weight overflows the weighted sum instead.
        let config = EnsembleConfig::default().with_weights(
            WeightTable::default().with_weight(ModelSource::GraphCast, f64::MAX),
        );
        let engine = EnsembleEngine::new(config).unwrap();
        let result = engine.create_ensemble_forecast_at(&aifs, &graphcast, None, fixed_now());

        assert!(result.is_fallback());
        assert_eq!(result.model_comparison.availability, Availability::AifsOnly);
    }

    #[test]
    fn skipped_points_mark_result_partial() {
        let mut gc = graphcast_json();
        gc["hourly_data"]
            .as_array_mut()
            .unwrap()
            .push(json!({"time": "garbage", "temperature": 1.0}));

        let result = engine().create_ensemble_from_json_at(&aifs_json(), &gc, None, fixed_now());
        assert!(result.is_degraded());
        assert!(!result.is_fallback());
        assert_eq!(
            result.metadata.status,
            FusionStatus::Partial { skipped_points: 1 }
        );
    }

    #[test]
    fn historical_payload_can_be_disabled() {
        let hist = json!({"observations": [{"time": "2025-01-15T06:00:00", "temperature": 15.0}]});

        let with = engine().create_ensemble_from_json_at(
            &aifs_json(),
            &graphcast_json(),
            Some(&hist),
            fixed_now(),
        );
        assert_eq!(with.ensemble_forecast.len(), 3);
        assert!(with.metadata.models_used.contains(&ModelSource::Eumetsat));

        let engine =
            EnsembleEngine::new(EnsembleConfig::default().with_historical(false)).unwrap();
        let without = engine.create_ensemble_from_json_at(
            &aifs_json(),
            &graphcast_json(),
            Some(&hist),
            fixed_now(),
        );
        assert_eq!(without.ensemble_forecast.len(), 2);
        assert!(!without.metadata.models_used.contains(&ModelSource::Eumetsat));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EnsembleConfig::default().with_agreement_scale(0.0);
        assert!(EnsembleEngine::new(config).is_err());

        let config = EnsembleConfig::default().with_agreement_window(chrono::Duration::days(365));
        assert!(EnsembleEngine::new(config).is_err());
    }

    #[test]
    fn result_serializes_to_json() {
        let result =
            engine().create_ensemble_from_json_at(&aifs_json(), &graphcast_json(), None, fixed_now());
        let json = result.to_json().unwrap();
        assert_eq!(json["metadata"]["ensemble_method"], "multi_model_weighted");
        assert_eq!(json["metadata"]["status"]["state"], "complete");
        assert_eq!(json["metadata"]["weights"]["aifs"], 0.4);
        assert_eq!(json["ensemble_forecast"][0]["contributing_models"]["GraphCast"], 1);
        assert_eq!(json["ensemble_statistics"]["status"], "complete");
    }
}
