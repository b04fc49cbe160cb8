//! `Percentile` pipeline step.
//!
//! Adds two columns: `<out> Value` repeats the requested percentile of the
//! input column on every row, and `<out> Tag` is `1.0` where the input is
//! above that value and `0.0` where it is at or below it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PostProcess;
use crate::diagnostics::Diagnostics;
use crate::error::{GapfillError, Result};
use crate::interpolation::linear::linear_weight;
use crate::table::Table;

/// Tag value for rows above the percentile
pub const ABOVE: f64 = 1.0;
/// Tag value for rows at or below the percentile
pub const BELOW: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Percentile {
    pub col_key: String,
    /// Whole percent, 0 to 100
    pub percentile: i64,
    pub output_col_key: String,
}

impl Percentile {
    pub fn value_column(&self) -> String {
        format!("{} Value", self.output_col_key)
    }

    pub fn tag_column(&self) -> String {
        format!("{} Tag", self.output_col_key)
    }
}

impl PostProcess for Percentile {
    fn name(&self) -> &'static str {
        "Percentile"
    }

    fn apply(&self, mut table: Table, diagnostics: &mut Diagnostics) -> Result<Table> {
        let values = table.column_checked(&self.col_key)?;

        if !(0..=100).contains(&self.percentile) {
            return Err(GapfillError::InvalidParameter {
                param: "percentile".to_string(),
                message: format!("must be between 0 and 100, got {}", self.percentile),
            });
        }

        let mut present: Vec<f64> = values.iter().flatten().copied().collect();
        present.sort_by(f64::total_cmp);
        let threshold = quantile(&present, self.percentile as f64 / 100.0);

        let tags: Vec<Option<f64>> = values
            .iter()
            .map(|v| match (v, threshold) {
                (Some(v), Some(t)) => Some(if *v <= t { BELOW } else { ABOVE }),
                _ => None,
            })
            .collect();

        if threshold.is_none() {
            diagnostics.warn(
                self.name(),
                format!("Column '{}' has no values to rank", self.col_key),
            );
        }

        debug!(
            column = %self.col_key,
            percentile = self.percentile,
            value = ?threshold,
            "Computed percentile"
        );

        table.set_column(&self.value_column(), vec![threshold; table.len()])?;
        table.set_column(&self.tag_column(), tags)?;
        Ok(table)
    }
}

/// Quantile of sorted data, linearly interpolated between the two closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;

    if lower == upper || upper >= n {
        Some(sorted[lower.min(n - 1)])
    } else {
        let (w_lower, w_upper) = linear_weight(pos - lower as f64);
        Some(sorted[lower] * w_lower + sorted[upper] * w_upper)
    }
}
