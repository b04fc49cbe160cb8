//! Post-processing operations applied to a table in sequence.
//!
//! Each pipeline step is written as `{"key": "<Name>", "args": {...}}`.
//! Keys resolve through a fixed registry to one [`Operation`] variant;
//! arguments are deserialized strictly so that a mistyped or unexpected
//! argument fails before any step runs.

pub mod arithmetic;
pub mod combine;
pub mod interpolation;
pub mod percentile;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::diagnostics::Diagnostics;
use crate::error::{GapfillError, Result};
use crate::logging::{log_operation_end, log_operation_start};
use crate::table::Table;

pub use arithmetic::{ArithmeticOp, ArithmeticOperation, ImmediateArithmeticOperation};
pub use combine::Combine;
pub use interpolation::LinearInterpolation;
pub use percentile::Percentile;

/// Names accepted in the `key` field of a pipeline step
pub const OPERATIONS: &[&str] = &[
    "LinearInterpolation",
    "ArithmeticOperation",
    "ImmediateArithmeticOperation",
    "Combine",
    "Percentile",
];

/// A single operation on a table
pub trait PostProcess {
    /// Name of the operation as used in pipeline steps
    fn name(&self) -> &'static str;

    /// Apply the operation, returning the updated table
    fn apply(&self, table: Table, diagnostics: &mut Diagnostics) -> Result<Table>;
}

/// A pipeline step as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    pub key: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl StepSpec {
    pub fn new(key: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            args,
        }
    }
}

/// Every registered operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    LinearInterpolation(LinearInterpolation),
    ArithmeticOperation(ArithmeticOperation),
    ImmediateArithmeticOperation(ImmediateArithmeticOperation),
    Combine(Combine),
    Percentile(Percentile),
}

impl Operation {
    /// Resolve a step to its operation, checking the arguments
    pub fn from_step(step: &StepSpec) -> Result<Self> {
        match step.key.as_str() {
            "LinearInterpolation" => parse_args(step).map(Self::LinearInterpolation),
            "ArithmeticOperation" => parse_args(step).map(Self::ArithmeticOperation),
            "ImmediateArithmeticOperation" => {
                parse_args(step).map(Self::ImmediateArithmeticOperation)
            }
            "Combine" => parse_args(step).map(Self::Combine),
            "Percentile" => parse_args(step).map(Self::Percentile),
            _ => Err(GapfillError::UnknownOperation {
                key: step.key.clone(),
                available: OPERATIONS.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    fn as_post_process(&self) -> &dyn PostProcess {
        match self {
            Self::LinearInterpolation(op) => op,
            Self::ArithmeticOperation(op) => op,
            Self::ImmediateArithmeticOperation(op) => op,
            Self::Combine(op) => op,
            Self::Percentile(op) => op,
        }
    }
}

impl PostProcess for Operation {
    fn name(&self) -> &'static str {
        self.as_post_process().name()
    }

    fn apply(&self, table: Table, diagnostics: &mut Diagnostics) -> Result<Table> {
        self.as_post_process().apply(table, diagnostics)
    }
}

fn parse_args<T: DeserializeOwned>(step: &StepSpec) -> Result<T> {
    let args = if step.args.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        step.args.clone()
    };

    serde_json::from_value(args).map_err(|e| GapfillError::InvalidArguments {
        key: step.key.clone(),
        message: e.to_string(),
    })
}

/// Resolve every step up front so a bad step fails before any runs
pub fn resolve_pipeline(steps: &[StepSpec]) -> Result<Vec<Operation>> {
    steps.iter().map(Operation::from_step).collect()
}

/// Run the steps in order, stopping at the first error
pub fn run_pipeline(
    mut table: Table,
    steps: &[StepSpec],
    diagnostics: &mut Diagnostics,
) -> Result<Table> {
    let operations = resolve_pipeline(steps)?;

    for (i, operation) in operations.iter().enumerate() {
        let details = format!("step {} of {}", i + 1, operations.len());
        log_operation_start(operation.name(), Some(&details));
        let start = Instant::now();

        let warnings_before = diagnostics.warnings().count();
        table = operation.apply(table, diagnostics)?;

        let clean = diagnostics.warnings().count() == warnings_before;
        log_operation_end(operation.name(), start, clean);
    }

    Ok(table)
}
