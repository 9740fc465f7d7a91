//! Benchmarks for the ensemble pipeline.
//!
//! Agreement pairing is the only super-linear stage, so series lengths grow
//! up to multi-week hourly data.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_ensemble::core::ModelSource;
use weather_ensemble::ensemble::EnsembleEngine;
use weather_ensemble::sources::{PayloadMetadata, SourcePayload};

fn generate_payload(source: ModelSource, n: usize, step_hours: i64) -> SourcePayload {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let temp_key = match source {
        ModelSource::Aifs => "temperature_2m",
        _ => "temperature",
    };
    let points = (0..n)
        .map(|i| {
            let t = base + Duration::hours(i as i64 * step_hours);
            let temp = 15.0 + 5.0 * (2.0 * std::f64::consts::PI * i as f64 / 24.0).sin();
            serde_json::json!({ "time": t.to_rfc3339(), temp_key: temp })
        })
        .collect();
    SourcePayload::new(source, points, PayloadMetadata::live())
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensemble_pipeline");
    let engine = EnsembleEngine::default();

    for hours in [48, 168, 720, 2160].iter() {
        let aifs = generate_payload(ModelSource::Aifs, hours / 6, 6);
        let graphcast = generate_payload(ModelSource::GraphCast, *hours, 1);
        let historical = generate_payload(ModelSource::Eumetsat, hours / 6, 6);

        group.bench_with_input(BenchmarkId::new("forecast_only", hours), hours, |b, _| {
            b.iter(|| engine.create_ensemble_forecast(black_box(&aifs), black_box(&graphcast), None))
        });

        group.bench_with_input(BenchmarkId::new("with_historical", hours), hours, |b, _| {
            b.iter(|| {
                engine.create_ensemble_forecast(
                    black_box(&aifs),
                    black_box(&graphcast),
                    Some(black_box(&historical)),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
