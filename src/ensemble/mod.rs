//! The prediction ensemble engine.
//!
//! Standardized observations from every source are aligned into hourly
//! buckets, fused bucket by bucket with per-source weights, and summarized
//! with coverage and agreement statistics.

mod align;
mod compare;
mod config;
mod engine;
mod fusion;
mod statistics;
mod weights;

pub use align::{align, truncate_to_hour, TimeBucket};
pub use compare::{
    compare_models, Availability, ModelCharacteristics, ModelComparison, PerformanceComparison,
};
pub use config::{EnsembleConfig, MAX_AGREEMENT_WINDOW_SECS};
pub use engine::{
    EnsembleEngine, EnsembleMetadata, EnsembleMethod, EnsembleResult, FusionStatus,
};
pub use fusion::fuse_bucket;
pub use statistics::{
    agreement_score, compute_statistics, model_agreement, temporal_range, AgreementQuality,
    EnsembleStatistics, ModelCoverage, StatisticsStatus, TemporalRange,
};
pub use weights::{WeightTable, DEFAULT_SOURCE_WEIGHT};
