//! Gap-limited interpolation for irregular time series.
//!
//! The work is split into small pieces that the operator strings together:
//!
//! - [`grid`] derives the uniform target timestamps
//! - [`timeline`] merges the grid with the observed timestamps
//! - [`gaps`] labels every run of missing values as fillable or not
//! - [`linear`] fills the fillable runs, weighted by elapsed time
//! - [`operator`] validates input, runs the steps and re-joins the result
//!   with the original observations

pub mod gaps;
pub mod grid;
pub mod linear;
pub mod operator;
pub mod timeline;

use crate::error::Result;

pub use gaps::{classify, tag_positions, Gap, GapKind, PointState};
pub use grid::build_grid;
pub use linear::LinearTimeInterpolator;
pub use operator::{interpolate, interpolate_with};
pub use timeline::{merge, MergedTimeline, TimelineEntry};

/// Trait for methods that fill classified gaps in a merged timeline
pub trait GapFiller {
    /// Populate every fillable gap in place, returning the number of filled positions
    fn fill(&self, timeline: &mut MergedTimeline, gaps: &[Gap]) -> usize;

    /// Get the name of this fill method
    fn name(&self) -> &str;
}

/// Get a gap filler by name
pub fn get_gap_filler(name: &str) -> Result<Box<dyn GapFiller>> {
    match name.to_lowercase().as_str() {
        "linear" | "time" => Ok(Box::new(LinearTimeInterpolator)),
        _ => Err(crate::error::GapfillError::InvalidParameter {
            param: "method".to_string(),
            message: format!(
                "Unknown interpolation method: {}. Must be one of: linear, time",
                name
            ),
        }),
    }
}
