//! Gap classification.
//!
//! A gap is a maximal run of missing positions in the merged timeline.
//! Its duration is the time covered by the missing samples (first to last
//! missing timestamp plus one grid step), capped by the real time between
//! its two anchors. Five missing hourly samples between anchors six hours
//! apart make a five hour gap; a missing grid point between observations
//! twenty minutes apart makes a twenty minute gap whatever the step.
//! Interior gaps are fillable when that duration is within the limit
//! (inclusive). Leading and trailing gaps are never filled.

use chrono::Duration;

use super::timeline::MergedTimeline;

/// Where a gap sits relative to the real observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapKind {
    /// Missing values before the first real value
    Leading,
    /// Missing values between two real values
    Interior { fillable: bool },
    /// Missing values after the last real value
    Trailing,
}

/// A run of missing positions `start..end` in a merged timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
    /// Index of the real value just before the gap
    pub anchor_before: Option<usize>,
    /// Index of the real value just after the gap
    pub anchor_after: Option<usize>,
    pub kind: GapKind,
}

impl Gap {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_fillable(&self) -> bool {
        matches!(self.kind, GapKind::Interior { fillable: true })
    }
}

/// Per-position state after classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointState {
    Real(f64),
    MissingFillable,
    MissingUnfillable,
}

/// Scan the timeline once and label every gap.
///
/// `step` is the grid interval the timeline was resampled onto.
pub fn classify(timeline: &MergedTimeline, limit: Duration, step: Duration) -> Vec<Gap> {
    let entries = &timeline.entries;
    let mut gaps = Vec::new();
    let mut last_anchor: Option<usize> = None;
    let mut open: Option<usize> = None;

    for (idx, entry) in entries.iter().enumerate() {
        if entry.value.is_none() {
            if open.is_none() {
                open = Some(idx);
            }
            continue;
        }

        if let Some(start) = open.take() {
            let kind = match last_anchor {
                Some(anchor) => {
                    let span = entry.timestamp - entries[anchor].timestamp;
                    let run = entries[idx - 1].timestamp - entries[start].timestamp + step;
                    let duration = span.min(run);
                    GapKind::Interior {
                        fillable: duration <= limit,
                    }
                }
                None => GapKind::Leading,
            };
            gaps.push(Gap {
                start,
                end: idx,
                anchor_before: last_anchor,
                anchor_after: Some(idx),
                kind,
            });
        }
        last_anchor = Some(idx);
    }

    if let Some(start) = open {
        // A series with no real values at all is one leading gap
        let kind = if last_anchor.is_some() {
            GapKind::Trailing
        } else {
            GapKind::Leading
        };
        gaps.push(Gap {
            start,
            end: entries.len(),
            anchor_before: last_anchor,
            anchor_after: None,
            kind,
        });
    }

    gaps
}

/// Expand a gap list into one tag per timeline position
pub fn tag_positions(timeline: &MergedTimeline, gaps: &[Gap]) -> Vec<PointState> {
    let mut states: Vec<PointState> = timeline
        .entries
        .iter()
        .map(|e| match e.value {
            Some(v) => PointState::Real(v),
            None => PointState::MissingUnfillable,
        })
        .collect();

    for gap in gaps.iter().filter(|g| g.is_fillable()) {
        for state in &mut states[gap.start..gap.end] {
            *state = PointState::MissingFillable;
        }
    }

    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::timeline::merge;
    use crate::series::Series;
    use chrono::{DateTime, TimeZone, Utc};

    fn hour() -> Duration {
        Duration::hours(1)
    }

    fn at(hour: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
    }

    fn timeline(values: &[Option<f64>]) -> MergedTimeline {
        let stamps: Vec<_> = (0..values.len() as i64).map(at).collect();
        merge(&Series::from_parts(&stamps, values).unwrap(), &[])
    }

    #[test]
    fn test_interior_gap_within_limit() {
        let tl = timeline(&[Some(1.0), None, None, Some(4.0)]);
        let gaps = classify(&tl, Duration::hours(2), hour());
        assert_eq!(gaps.len(), 1);
        assert_eq!((gaps[0].start, gaps[0].end), (1, 3));
        assert_eq!(gaps[0].anchor_before, Some(0));
        assert_eq!(gaps[0].anchor_after, Some(3));
        assert!(gaps[0].is_fillable());
    }

    #[test]
    fn test_limit_is_inclusive() {
        for hours in [3, 5, 6, 7] {
            let mut values = vec![Some(0.0)];
            values.extend(std::iter::repeat(None).take(hours as usize));
            values.push(Some(hours as f64 + 1.0));
            let tl = timeline(&values);

            let exact = classify(&tl, Duration::hours(hours), hour());
            assert!(exact[0].is_fillable(), "{}h gap at {}h limit", hours, hours);

            let shorter = classify(&tl, Duration::hours(hours) - Duration::seconds(1), hour());
            assert!(!shorter[0].is_fillable(), "{}h gap just under limit", hours);
        }
    }

    #[test]
    fn test_boundary_gaps_are_never_fillable() {
        let tl = timeline(&[None, None, Some(3.0), None, Some(5.0), None]);
        let gaps = classify(&tl, Duration::days(365), hour());

        let kinds: Vec<_> = gaps.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![
                GapKind::Leading,
                GapKind::Interior { fillable: true },
                GapKind::Trailing
            ]
        );
        assert_eq!(gaps[2].anchor_after, None);
        assert_eq!(gaps[0].anchor_before, None);
    }

    #[test]
    fn test_all_missing_is_one_leading_gap() {
        let tl = timeline(&[None, None, None]);
        let gaps = classify(&tl, Duration::hours(10), hour());
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].kind, GapKind::Leading);
        assert_eq!(gaps[0].len(), 3);
    }

    #[test]
    fn test_mixed_gap_lengths() {
        // Gaps of 3h (fillable) and 6h (not) against a 5h limit
        let mut values = vec![Some(1.0), None, None, None, Some(5.0)];
        values.extend([None; 6]);
        values.push(Some(12.0));
        let tl = timeline(&values);

        let gaps = classify(&tl, Duration::hours(5), hour());
        assert_eq!(gaps.len(), 2);
        assert!(gaps[0].is_fillable());
        assert!(!gaps[1].is_fillable());
    }

    #[test]
    fn test_off_grid_anchors_bound_the_gap() {
        // Observations at 0:50 and 1:10 around a missing hourly grid point
        let at_min = |m: i64| at(0) + Duration::minutes(m);
        let series = Series::from_parts(
            &[at_min(0), at_min(50), at_min(70), at_min(120)],
            &[Some(0.0), Some(5.0), Some(7.0), Some(12.0)],
        )
        .unwrap();
        let tl = merge(&series, &[at_min(0), at_min(60), at_min(120)]);

        let gaps = classify(&tl, Duration::seconds(60), hour());
        assert_eq!(gaps.len(), 1);
        assert_eq!((gaps[0].start, gaps[0].end), (2, 3));
        assert!(!gaps[0].is_fillable());

        let just_under = classify(&tl, Duration::minutes(20) - Duration::seconds(1), hour());
        assert!(!just_under[0].is_fillable());

        let exact = classify(&tl, Duration::minutes(20), hour());
        assert!(exact[0].is_fillable());
    }

    #[test]
    fn test_run_between_off_grid_anchors() {
        // 0:17 and 0:30 bracket grid points 0:18 and 0:24 on a 6 minute grid
        let at_min = |m: i64| at(0) + Duration::minutes(m);
        let series = Series::from_parts(
            &[at_min(0), at_min(12), at_min(17), at_min(30)],
            &[Some(1.0), Some(1.2), Some(1.25), Some(1.4)],
        )
        .unwrap();
        let grid: Vec<_> = (0..=5).map(|i| at_min(i * 6)).collect();
        let tl = merge(&series, &grid);
        let step = Duration::minutes(6);

        // One missing sample at 0:06 covers 6 minutes, the pair at 0:18-0:24 covers 12
        let gaps = classify(&tl, Duration::minutes(10), step);
        assert_eq!(gaps.len(), 2);
        assert_eq!((gaps[1].start, gaps[1].end), (4, 6));
        assert!(gaps[0].is_fillable());
        assert!(!gaps[1].is_fillable());

        let gaps = classify(&tl, Duration::minutes(12), step);
        assert!(gaps[1].is_fillable());
    }

    #[test]
    fn test_tag_positions() {
        let tl = timeline(&[None, Some(1.0), None, Some(3.0), None, None, None, Some(7.0)]);
        let gaps = classify(&tl, Duration::hours(2), hour());
        let states = tag_positions(&tl, &gaps);
        assert_eq!(
            states,
            vec![
                PointState::MissingUnfillable,
                PointState::Real(1.0),
                PointState::MissingFillable,
                PointState::Real(3.0),
                PointState::MissingUnfillable,
                PointState::MissingUnfillable,
                PointState::MissingUnfillable,
                PointState::Real(7.0),
            ]
        );
    }
}
