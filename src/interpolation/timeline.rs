//! Merged timeline of observed and grid timestamps.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::series::Series;

/// One position in the merged timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry {
    pub timestamp: DateTime<Utc>,
    /// Working value; starts as the observed value and may be filled
    pub value: Option<f64>,
    /// The value exactly as observed, `None` for grid-only positions
    pub original_value: Option<f64>,
    /// Timestamp belongs to the target grid
    pub on_grid: bool,
    /// Timestamp belongs to the input series
    pub original: bool,
}

/// Sorted union of a series' timestamps and a grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTimeline {
    pub entries: Vec<TimelineEntry>,
}

impl MergedTimeline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of positions that are currently missing
    pub fn count_missing(&self) -> usize {
        self.entries.iter().filter(|e| e.value.is_none()).count()
    }
}

/// Merge a series with grid timestamps in one linear walk.
///
/// Both inputs must be sorted ascending; a timestamp present in both
/// yields a single entry flagged as on-grid and original.
pub fn merge(series: &Series, grid: &[DateTime<Utc>]) -> MergedTimeline {
    let points = series.points();
    let mut entries = Vec::with_capacity(points.len() + grid.len());
    let (mut i, mut j) = (0, 0);

    while i < points.len() || j < grid.len() {
        let order = match (points.get(i), grid.get(j)) {
            (Some(p), Some(g)) => p.timestamp.cmp(g),
            (Some(_), None) => Ordering::Less,
            (None, _) => Ordering::Greater,
        };

        let entry = match order {
            Ordering::Less => {
                let p = points[i];
                i += 1;
                TimelineEntry {
                    timestamp: p.timestamp,
                    value: p.value,
                    original_value: p.value,
                    on_grid: false,
                    original: true,
                }
            }
            Ordering::Equal => {
                let p = points[i];
                i += 1;
                j += 1;
                TimelineEntry {
                    timestamp: p.timestamp,
                    value: p.value,
                    original_value: p.value,
                    on_grid: true,
                    original: true,
                }
            }
            Ordering::Greater => {
                let ts = grid[j];
                j += 1;
                TimelineEntry {
                    timestamp: ts,
                    value: None,
                    original_value: None,
                    on_grid: true,
                    original: false,
                }
            }
        };
        entries.push(entry);
    }

    MergedTimeline { entries }
}
