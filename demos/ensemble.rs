//! End-to-end ensemble run over synthetic AIFS, GraphCast and EUMETSAT payloads.
//!
//! Run with: cargo run --example ensemble
//! Set RUST_LOG=weather_ensemble=debug to see pipeline logging.

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use weather_ensemble::ensemble::{EnsembleConfig, EnsembleEngine};
use weather_ensemble::report::{EnsembleReport, ReportOptions};

fn diurnal(hour: i64) -> f64 {
    15.0 + 6.0 * ((hour as f64 - 9.0) * std::f64::consts::PI / 12.0).sin()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== weather-ensemble Demo ===\n");

    let start = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();

    // 1. AIFS: six-hourly over two days
    let aifs_points: Vec<Value> = (0..8)
        .map(|i| {
            let h = 6 * i;
            json!({
                "time": (start + Duration::hours(h)).to_rfc3339(),
                "temperature_2m": diurnal(h) + 0.4,
                "relative_humidity_2m": 65.0,
                "surface_pressure": 1013.0,
                "wind_speed_10m": 8.0,
                "wind_direction_10m": 180.0,
                "precipitation": 0.0,
                "forecast_hour": h
            })
        })
        .collect();
    let aifs = json!({
        "forecast_data": aifs_points,
        "metadata": {"model": "AIFS Single v1.0", "is_mock": false}
    });

    // 2. GraphCast: hourly over the first day
    let graphcast_points: Vec<Value> = (0..24)
        .map(|h| {
            json!({
                "time": (start + Duration::hours(h)).to_rfc3339(),
                "temperature": diurnal(h) - 0.3,
                "humidity": 62.0,
                "pressure": 1012.5,
                "wind_speed": 9.1,
                "wind_direction": 190.0,
                "precipitation": if h % 7 == 0 { 0.4 } else { 0.0 }
            })
        })
        .collect();
    let graphcast = json!({
        "hourly_data": graphcast_points,
        "metadata": {"model": "GraphCast", "is_mock": true}
    });

    // 3. EUMETSAT: a few past observations
    let historical = json!({
        "historical_data": (1..=3)
            .map(|h| json!({
                "time": (start - Duration::hours(h)).to_rfc3339(),
                "temperature": diurnal(-h),
                "humidity": 70.0
            }))
            .collect::<Vec<_>>(),
        "metadata": {"source": "EUMETSAT"}
    });

    // 4. Fuse
    let engine = match EnsembleEngine::new(EnsembleConfig::default()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };
    let result = engine.create_ensemble_from_json(&aifs, &graphcast, Some(&historical));

    let options = ReportOptions::default()
        .with_location(48.8566, 2.3522)
        .with_highlights(6);
    println!("{}", EnsembleReport::new(&result, options));

    // 5. Machine-readable form
    println!("\n--- First fused point (JSON) ---");
    let first = result
        .to_json()
        .and_then(|json| Ok(serde_json::to_string_pretty(&json["ensemble_forecast"][0])?));
    match first {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Serialization failed: {}", e),
    }

    println!("\n=== Demo Complete ===");
}
