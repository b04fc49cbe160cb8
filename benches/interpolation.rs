//! Interpolation benchmarks.
//!
//! Run with: cargo bench --bench interpolation

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gapfill::{interpolate, Diagnostics, Series};

/// Irregular series: 5-7 minute spacing, every 11th point missing and a
/// long outage every 500 points
fn generate_series(n: usize) -> Series {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut stamps = Vec::with_capacity(n);
    let mut values = Vec::with_capacity(n);
    let mut t = start;

    for i in 0..n {
        t += Duration::minutes(5 + (i % 3) as i64);
        stamps.push(t);
        let missing = i % 11 == 0 || (i % 500) >= 480;
        values.push((!missing).then(|| (i as f64 * 0.05).sin() * 2.0 + 10.0));
    }

    Series::from_parts(&stamps, &values).unwrap()
}

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    for size in [1_000, 10_000, 100_000] {
        let series = generate_series(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, series| {
            b.iter(|| {
                let mut diagnostics = Diagnostics::new("bench");
                interpolate(black_box(series), 360, 3600, &mut diagnostics).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interpolate);
criterion_main!(benches);
