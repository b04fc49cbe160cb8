//! Time series data model.
//!
//! A [`Series`] is a sequence of [`TimePoint`]s with strictly increasing
//! timestamps. Values are `Option<f64>`: `None` is the explicit missing
//! marker, and a `NaN` handed in by a caller is normalised to `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GapfillError, Result};

/// A single timestamped observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// When the observation was taken
    pub timestamp: DateTime<Utc>,
    /// Observed value, `None` when missing
    pub value: Option<f64>,
}

impl TimePoint {
    /// Create a new point, treating `NaN` as missing
    pub fn new(timestamp: DateTime<Utc>, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value: value.filter(|v| !v.is_nan()),
        }
    }

    /// Create a point with no value
    pub fn missing(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Whether this point carries a real value
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// A sequence of points sorted by strictly increasing timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: Vec<TimePoint>,
}

impl Series {
    /// Build a series, rejecting unsorted or duplicate timestamps
    pub fn new(points: Vec<TimePoint>) -> Result<Self> {
        if let Some(pos) = points
            .windows(2)
            .position(|pair| pair[0].timestamp >= pair[1].timestamp)
        {
            return Err(GapfillError::InvalidSeries {
                message: format!(
                    "timestamps must be strictly increasing, but position {} ({}) is not after position {} ({})",
                    pos + 1,
                    points[pos + 1].timestamp,
                    pos,
                    points[pos].timestamp
                ),
            });
        }

        let points = points
            .into_iter()
            .map(|p| TimePoint::new(p.timestamp, p.value))
            .collect();

        Ok(Self { points })
    }

    /// Build a series from parallel timestamp and value slices
    pub fn from_parts(timestamps: &[DateTime<Utc>], values: &[Option<f64>]) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(GapfillError::InvalidSeries {
                message: format!(
                    "{} timestamps but {} values",
                    timestamps.len(),
                    values.len()
                ),
            });
        }

        let points = timestamps
            .iter()
            .zip(values)
            .map(|(&ts, &value)| TimePoint::new(ts, value))
            .collect();

        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(|p| p.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(|p| p.timestamp)
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of non-missing values
    pub fn count_present(&self) -> usize {
        self.points.iter().filter(|p| p.is_present()).count()
    }

    /// Look up the value recorded at an exact timestamp.
    ///
    /// Returns `None` both when the timestamp is absent and when it is
    /// present with a missing value; use [`Series::contains`] to tell them apart.
    pub fn value_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.timestamp.cmp(&timestamp))
            .ok()
            .and_then(|idx| self.points[idx].value)
    }

    /// Whether the series has a point at exactly this timestamp
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.points
            .binary_search_by(|p| p.timestamp.cmp(&timestamp))
            .is_ok()
    }
}

/// Elapsed time from `from` to `to` in seconds, keeping sub-second precision
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        // Spans beyond ~292 years overflow nanoseconds
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}
