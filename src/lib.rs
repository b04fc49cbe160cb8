//! # gapfill
//!
//! Gap-limited, time-weighted linear interpolation for irregularly sampled
//! time series.
//!
//! The core operation resamples a series onto a uniform grid, fills gaps
//! that are no longer than a configurable real-time limit and never
//! alters or drops an original observation, even one that does not fall
//! on the grid.
//!
//! ## Architecture
//!
//! - **Data model**: [`Series`] of [`TimePoint`]s and a time-indexed [`Table`]
//! - **Interpolation**: grid building, gap classification, time-weighted filling
//! - **Pipeline**: a fixed registry of post-processing steps applied to a table
//! - **I/O**: CSV ingestion and export for the command-line tool

pub mod config;
pub mod csv_io;
pub mod diagnostics;
pub mod error;
pub mod interpolation;
pub mod logging;
pub mod postprocess;
pub mod series;
pub mod table;

pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use error::{GapfillError, Result};
pub use interpolation::interpolate;
pub use logging::{
    generate_run_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_table_stats, log_timed_operation,
};
pub use postprocess::{run_pipeline, Operation, PostProcess, StepSpec};
pub use series::{Series, TimePoint};
pub use table::{Column, Table};
