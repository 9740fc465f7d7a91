//! Side-by-side comparison of AIFS and GraphCast under each availability case.
//!
//! Run with: cargo run --example compare_models

use weather_ensemble::ensemble::compare_models;
use weather_ensemble::report::ComparisonReport;
use weather_ensemble::sources::PayloadMetadata;

fn main() {
    let cases = [
        ("Both models live", PayloadMetadata::live(), PayloadMetadata::live()),
        ("AIFS only", PayloadMetadata::live(), PayloadMetadata::mock()),
        ("GraphCast only", PayloadMetadata::mock(), PayloadMetadata::live()),
        ("Neither live", PayloadMetadata::mock(), PayloadMetadata::mock()),
    ];

    for (label, aifs, graphcast) in &cases {
        println!("### {} ###\n", label);
        let comparison = compare_models(aifs, graphcast);
        println!("{}", ComparisonReport::new(&comparison, 41, 168));
    }
}
