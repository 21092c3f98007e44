//! Temporary catalog directories for tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

/// Write `records` as `<category>.json` in `dir`
pub fn write_category(dir: &Path, category: &str, records: &Value) {
    let path = dir.join(format!("{}.json", category));
    std::fs::write(path, serde_json::to_string_pretty(records).unwrap()).unwrap();
}

/// A discrete record with the given breaks, black to white
pub fn discrete_record(breaks: &[f64], units: &str) -> Value {
    let n = breaks.len().max(2) - 1;
    let data: Vec<Value> = breaks
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let level = (255 * i / n).min(255);
            json!([b, format!("#{:02x}{:02x}{:02x}", level, level, level), b.to_string()])
        })
        .collect();
    json!({
        "type": "discrete",
        "data": data,
        "units": units,
        "long_name": format!("Discrete {}", units),
    })
}

/// A continuous record with the given breaks and resolution
pub fn continuous_record(breaks: &[f64], units: &str, resolution: usize) -> Value {
    let palette = ["#313695", "#74add1", "#ffffbf", "#f46d43", "#a50026"];
    let data: Vec<Value> = breaks
        .iter()
        .enumerate()
        .map(|(i, b)| json!([b, palette[i % palette.len()], b.to_string()]))
        .collect();
    json!({
        "type": "continuous",
        "data": data,
        "units": units,
        "long_name": format!("Continuous {}", units),
        "N": resolution,
    })
}

/// Catalog with three categories:
///
/// - `atmosphere`: `ir` (discrete, C), `wind` (discrete, m s^{-1})
/// - `ocean`: `sst` (continuous, K), `ir` (discrete, K, shadowed)
/// - `precipitation`: `rain` (discrete, mm), `rain_smooth` (continuous, mm)
pub fn sample_catalog() -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    write_category(
        dir.path(),
        "atmosphere",
        &json!({
            "ir": discrete_record(&[-80.0, -60.0, -40.0, -20.0, 0.0, 20.0], "C"),
            "wind": discrete_record(&[0.0, 5.0, 10.0, 20.0], "m s^{-1}"),
        }),
    );
    write_category(
        dir.path(),
        "ocean",
        &json!({
            "sst": continuous_record(&[271.0, 285.0, 300.0, 305.0], "K", 32),
            "ir": discrete_record(&[200.0, 300.0], "K"),
        }),
    );
    write_category(
        dir.path(),
        "precipitation",
        &json!({
            "rain": discrete_record(&[0.0, 1.0, 5.0, 10.0, 50.0], "mm"),
            "rain_smooth": continuous_record(&[0.0, 50.0, 100.0], "mm", 10),
        }),
    );

    dir
}
