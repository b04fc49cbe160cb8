//! Test data generation utilities.
//!
//! This module provides builders for series and tables with known gap
//! patterns, and CSV fixtures written to temporary files.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use gapfill::{Column, Series, Table};

/// Start of every generated series
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// `base_time()` shifted by whole minutes
pub fn minutes(m: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(m)
}

/// `base_time()` shifted by whole hours
pub fn hours(h: i64) -> DateTime<Utc> {
    base_time() + Duration::hours(h)
}

/// A regularly spaced series starting at `base_time()`
pub fn regular_series(step: Duration, values: &[Option<f64>]) -> Series {
    let stamps: Vec<_> = (0..values.len() as i32)
        .map(|i| base_time() + step * i)
        .collect();
    Series::from_parts(&stamps, values).unwrap()
}

/// A series from explicit `(timestamp, value)` pairs
pub fn series_of(points: &[(DateTime<Utc>, Option<f64>)]) -> Series {
    let stamps: Vec<_> = points.iter().map(|p| p.0).collect();
    let values: Vec<_> = points.iter().map(|p| p.1).collect();
    Series::from_parts(&stamps, &values).unwrap()
}

/// A one-column table holding the given series
pub fn single_column_table(name: &str, series: &Series) -> Table {
    Table::new(
        series.timestamps(),
        vec![Column::new(name, series.values())],
    )
    .unwrap()
}

/// Irregular water-level readings with two short gaps and one long gap
pub const IRREGULAR_CSV: &str = "\
date_time,water_level,air_temp
2025-01-01T00:00:00Z,1.00,10.0
2025-01-01T00:06:00Z,,10.1
2025-01-01T00:12:00Z,1.20,10.2
2025-01-01T00:17:00Z,1.25,
2025-01-01T00:24:00Z,,10.4
2025-01-01T00:30:00Z,1.40,10.5
2025-01-01T00:36:00Z,,10.6
2025-01-01T00:42:00Z,,10.7
2025-01-01T00:48:00Z,,10.8
2025-01-01T00:54:00Z,,10.9
2025-01-01T01:00:00Z,,11.0
2025-01-01T01:06:00Z,2.00,11.1
";

/// Write a fixture file (CSV data or JSON config) into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}
