//! Uniform target grid.

use chrono::{DateTime, Duration, Utc};

/// Build the grid `t_min, t_min + step, t_min + 2*step, ...` up to and
/// not exceeding `t_max`.
///
/// `t_min` is always included; `t_max` only when the span is an exact
/// multiple of `step`. A non-positive step or an inverted range yields
/// just `t_min` or nothing; the operator rejects those before calling.
pub fn build_grid(t_min: DateTime<Utc>, t_max: DateTime<Utc>, step: Duration) -> Vec<DateTime<Utc>> {
    if t_min > t_max {
        return Vec::new();
    }
    if step <= Duration::zero() {
        return vec![t_min];
    }

    let mut grid = Vec::new();
    let mut current = Some(t_min);
    while let Some(ts) = current {
        if ts > t_max {
            break;
        }
        grid.push(ts);
        current = ts.checked_add_signed(step);
    }
    grid
}
