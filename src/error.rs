//! Error types for the gapfill crate.
//!
//! Every failure is raised before any mutation happens, so a failed call
//! never leaves a partially interpolated table behind.

use thiserror::Error;

/// The main error type for gapfill operations.
#[derive(Error, Debug)]
pub enum GapfillError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed CSV content that the csv crate itself accepted
    #[error("CSV error at row {row}, column '{column}': {message}")]
    CsvValue {
        row: usize,
        column: String,
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// The requested column does not exist
    #[error("Column not found: '{column}'. Available columns: [{}]", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// The table has no rows
    #[error("Table is empty: nothing to process")]
    EmptyTable,

    /// The table is not indexed by real timestamps
    #[error("Table is not time indexed: {message}")]
    NotTimeIndexed { message: String },

    /// A series violates the strictly increasing timestamp invariant
    #[error("Invalid series: {message}")]
    InvalidSeries { message: String },

    /// A pipeline step names an operation that is not registered
    #[error("Unknown operation: '{key}'. Available operations: [{}]", available.join(", "))]
    UnknownOperation { key: String, available: Vec<String> },

    /// The arguments of a pipeline step have the wrong shape or type
    #[error("Invalid arguments for {key}: {message}")]
    InvalidArguments { key: String, message: String },
}

/// Convenience type alias for Results with GapfillError
pub type Result<T> = std::result::Result<T, GapfillError>;
