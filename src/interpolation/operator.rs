//! The interpolation operator.
//!
//! Validates the request, resamples the series onto a uniform grid, fills
//! gaps no longer than the limit and re-joins the result with the
//! original observations so none of them is lost or altered.

use chrono::Duration;
use tracing::debug;

use super::gaps::classify;
use super::grid::build_grid;
use super::timeline::merge;
use super::{GapFiller, LinearTimeInterpolator};
use crate::diagnostics::Diagnostics;
use crate::error::{GapfillError, Result};
use crate::series::{Series, TimePoint};

/// Operation name used in diagnostics and pipeline steps
pub const OPERATION: &str = "LinearInterpolation";

/// Interpolate `series` onto a grid of `interval_secs`, filling interior
/// gaps no longer than `limit_secs`.
///
/// The result is indexed by the grid plus every original timestamp. Grid
/// positions carry the filled (or still missing) value; off-grid original
/// positions carry their original value untouched. A limit of zero means
/// never interpolate and returns the input unchanged.
pub fn interpolate(
    series: &Series,
    interval_secs: i64,
    limit_secs: i64,
    diagnostics: &mut Diagnostics,
) -> Result<Series> {
    interpolate_with(
        &LinearTimeInterpolator,
        "series",
        series,
        interval_secs,
        limit_secs,
        diagnostics,
    )
}

/// Same as [`interpolate`] with an explicit fill method and a label for diagnostics
pub fn interpolate_with(
    filler: &dyn GapFiller,
    label: &str,
    series: &Series,
    interval_secs: i64,
    limit_secs: i64,
    diagnostics: &mut Diagnostics,
) -> Result<Series> {
    let (interval, limit) = validate(series, interval_secs, limit_secs)?;

    if limit == Duration::zero() {
        debug!(label = label, "Limit is zero, leaving series unchanged");
        return Ok(series.clone());
    }

    // Non-empty was checked above
    let (Some(t_min), Some(t_max)) = (series.first_timestamp(), series.last_timestamp()) else {
        return Err(GapfillError::EmptyTable);
    };

    let grid = build_grid(t_min, t_max, interval);
    let mut timeline = merge(series, &grid);
    let gaps = classify(&timeline, limit, interval);
    let filled = filler.fill(&mut timeline, &gaps);

    debug!(
        label = label,
        method = filler.name(),
        grid_points = grid.len(),
        timeline_points = timeline.len(),
        gaps = gaps.len(),
        fillable_gaps = gaps.iter().filter(|g| g.is_fillable()).count(),
        filled = filled,
        "Classified and filled gaps"
    );

    // Grid positions take the filled value, off-grid originals their raw value
    let points = timeline
        .entries
        .iter()
        .map(|entry| {
            let value = if entry.on_grid {
                entry.value
            } else {
                entry.original_value
            };
            TimePoint::new(entry.timestamp, value)
        })
        .collect();
    let result = Series::new(points)?;

    let before = series.count_present();
    let after = result.count_present();
    if after < before {
        diagnostics.data_loss(OPERATION, label, before, after);
    }

    Ok(result)
}

fn validate(series: &Series, interval_secs: i64, limit_secs: i64) -> Result<(Duration, Duration)> {
    if series.is_empty() {
        return Err(GapfillError::EmptyTable);
    }

    if interval_secs <= 0 {
        return Err(GapfillError::InvalidParameter {
            param: "interpolation_interval".to_string(),
            message: format!(
                "must be a positive number of seconds, got {}",
                interval_secs
            ),
        });
    }
    let interval = Duration::try_seconds(interval_secs).ok_or_else(|| {
        GapfillError::InvalidParameter {
            param: "interpolation_interval".to_string(),
            message: format!("{} seconds is out of range", interval_secs),
        }
    })?;

    if limit_secs < 0 {
        return Err(GapfillError::InvalidParameter {
            param: "limit".to_string(),
            message: format!("must be a non-negative number of seconds, got {}", limit_secs),
        });
    }
    let limit = Duration::try_seconds(limit_secs).ok_or_else(|| GapfillError::InvalidParameter {
        param: "limit".to_string(),
        message: format!("{} seconds is out of range", limit_secs),
    })?;

    Ok((interval, limit))
}
