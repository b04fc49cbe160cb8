//! `LinearInterpolation` pipeline step.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::PostProcess;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::interpolation::{get_gap_filler, interpolate_with};
use crate::table::Table;

/// Resample one column onto a uniform grid and fill short gaps.
///
/// ```json
/// {
///     "key": "LinearInterpolation",
///     "args": {
///         "col_name": "water_level",
///         "interpolation_interval": 360,
///         "limit": 3600
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearInterpolation {
    /// Column to interpolate
    pub col_name: String,
    /// Grid interval in seconds
    pub interpolation_interval: i64,
    /// Longest gap to fill, in seconds
    pub limit: i64,
    /// Fill method
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "time".to_string()
}

impl PostProcess for LinearInterpolation {
    fn name(&self) -> &'static str {
        "LinearInterpolation"
    }

    fn apply(&self, mut table: Table, diagnostics: &mut Diagnostics) -> Result<Table> {
        let series = table.series(&self.col_name)?;
        table.ensure_not_empty()?;
        let filler = get_gap_filler(&self.method)?;

        let result = interpolate_with(
            filler.as_ref(),
            &self.col_name,
            &series,
            self.interpolation_interval,
            self.limit,
            diagnostics,
        )?;

        let rows_before = table.len();
        let missing_before = series.len() - series.count_present();
        table.replace_with_series(&self.col_name, &result)?;

        info!(
            column = %self.col_name,
            interval_secs = self.interpolation_interval,
            limit_secs = self.limit,
            rows_before = rows_before,
            rows_after = table.len(),
            missing_before = missing_before,
            missing_after = result.len() - result.count_present(),
            "Interpolated column"
        );

        Ok(table)
    }
}
