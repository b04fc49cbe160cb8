//! Time-weighted linear interpolation.
//!
//! Values inside a fillable gap are weighted by elapsed real time between
//! the two anchors, not by ordinal position, because the merged timeline
//! interleaves grid points with off-grid observations.

use super::gaps::{tag_positions, Gap, PointState};
use super::timeline::MergedTimeline;
use super::GapFiller;
use crate::series::seconds_between;

/// Linear interpolator weighted by elapsed time
pub struct LinearTimeInterpolator;

impl GapFiller for LinearTimeInterpolator {
    fn fill(&self, timeline: &mut MergedTimeline, gaps: &[Gap]) -> usize {
        let states = tag_positions(timeline, gaps);
        let mut filled = 0;

        for gap in gaps.iter().filter(|g| g.is_fillable()) {
            let (Some(before), Some(after)) = (gap.anchor_before, gap.anchor_after) else {
                continue;
            };
            let a = timeline.entries[before];
            let b = timeline.entries[after];
            let (Some(v_a), Some(v_b)) = (a.value, b.value) else {
                continue;
            };

            let span = seconds_between(a.timestamp, b.timestamp);
            let range = gap.start..gap.end;
            for (entry, state) in timeline.entries[range.clone()].iter_mut().zip(&states[range]) {
                if *state != PointState::MissingFillable {
                    continue;
                }
                let fraction = seconds_between(a.timestamp, entry.timestamp) / span;
                let (w_a, w_b) = linear_weight(fraction);
                entry.value = Some(w_a * v_a + w_b * v_b);
                filled += 1;
            }
        }

        filled
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Weights of the two anchors for a fractional position between them
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::gaps::classify;
    use crate::interpolation::timeline::merge;
    use crate::series::Series;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn test_linear_weight() {
        let (w0, w1) = linear_weight(0.3);
        assert!((w0 - 0.7).abs() < 1e-10);
        assert!((w1 - 0.3).abs() < 1e-10);
        assert!((w0 + w1 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_fill_weights_by_time_not_position() {
        // Anchors at 0h and 6h, an off-grid missing point at 5h and one grid point at 1h
        let series = Series::from_parts(
            &[at(0), at(300), at(360)],
            &[Some(0.0), None, Some(6.0)],
        )
        .unwrap();
        let mut timeline = merge(&series, &[at(0), at(60)]);
        let gaps = classify(&timeline, Duration::hours(6), Duration::hours(1));

        let filled = LinearTimeInterpolator.fill(&mut timeline, &gaps);
        assert_eq!(filled, 2);

        let values: Vec<_> = timeline.entries.iter().map(|e| e.value.unwrap()).collect();
        assert!((values[1] - 1.0).abs() < 1e-12);
        assert!((values[2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_unfillable_gaps_stay_missing() {
        let series = Series::from_parts(
            &[at(0), at(60), at(120), at(180)],
            &[Some(1.0), None, None, Some(4.0)],
        )
        .unwrap();
        let mut timeline = merge(&series, &[]);
        let gaps = classify(&timeline, Duration::hours(1), Duration::hours(1));

        assert_eq!(LinearTimeInterpolator.fill(&mut timeline, &gaps), 0);
        assert_eq!(timeline.count_missing(), 2);
    }

    #[test]
    fn test_anchor_values_untouched() {
        let series =
            Series::from_parts(&[at(0), at(45), at(90)], &[Some(2.5), None, Some(-1.5)]).unwrap();
        let mut timeline = merge(&series, &[]);
        let gaps = classify(&timeline, Duration::hours(2), Duration::hours(1));
        LinearTimeInterpolator.fill(&mut timeline, &gaps);

        assert_eq!(timeline.entries[0].value, Some(2.5));
        assert_eq!(timeline.entries[2].value, Some(-1.5));
        let mid = timeline.entries[1].value.unwrap();
        assert!((mid - 0.5).abs() < 1e-12);
    }
}
