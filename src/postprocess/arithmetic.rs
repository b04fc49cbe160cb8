//! Row-wise arithmetic between columns, or between a column and a constant.
//!
//! A missing operand gives a missing result, and so does any result that
//! is not a number (`x % 0`). Division by zero yields an infinity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PostProcess;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::table::Table;

/// Supported binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticOp {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
}

impl ArithmeticOp {
    /// Apply the operator to two present values
    pub fn eval(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Addition => left + right,
            Self::Subtraction => left - right,
            Self::Multiplication => left * right,
            Self::Division => left / right,
            Self::Modulo => floored_modulo(left, right),
        }
    }

    /// Apply the operator to two possibly missing values
    pub fn eval_missing(self, left: Option<f64>, right: Option<f64>) -> Option<f64> {
        match (left, right) {
            (Some(l), Some(r)) => Some(self.eval(l, r)).filter(|v| !v.is_nan()),
            _ => None,
        }
    }
}

/// Modulo whose result takes the sign of the divisor.
///
/// A finite value modulo an infinity is the value itself when the signs
/// agree (or it is zero) and the infinity otherwise.
fn floored_modulo(left: f64, right: f64) -> f64 {
    if right.is_infinite() && left.is_finite() {
        if left == 0.0 || left.is_sign_negative() == right.is_sign_negative() {
            return left;
        }
        return right;
    }
    left - right * (left / right).floor()
}

/// `out = left <op> right`, row by row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArithmeticOperation {
    pub op: ArithmeticOp,
    pub left_col_key: String,
    pub right_col_key: String,
    pub out_col_key: String,
}

impl PostProcess for ArithmeticOperation {
    fn name(&self) -> &'static str {
        "ArithmeticOperation"
    }

    fn apply(&self, mut table: Table, _diagnostics: &mut Diagnostics) -> Result<Table> {
        let left = table.column_checked(&self.left_col_key)?;
        let right = table.column_checked(&self.right_col_key)?;

        let out: Vec<Option<f64>> = left
            .iter()
            .zip(right)
            .map(|(&l, &r)| self.op.eval_missing(l, r))
            .collect();

        debug!(
            op = ?self.op,
            left = %self.left_col_key,
            right = %self.right_col_key,
            out = %self.out_col_key,
            "Applied column arithmetic"
        );

        table.set_column(&self.out_col_key, out)?;
        Ok(table)
    }
}

/// `out = left <op> value`, row by row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImmediateArithmeticOperation {
    pub op: ArithmeticOp,
    pub left_col_key: String,
    pub value: f64,
    pub out_col_key: String,
}

impl PostProcess for ImmediateArithmeticOperation {
    fn name(&self) -> &'static str {
        "ImmediateArithmeticOperation"
    }

    fn apply(&self, mut table: Table, _diagnostics: &mut Diagnostics) -> Result<Table> {
        let out: Vec<Option<f64>> = table
            .column_checked(&self.left_col_key)?
            .iter()
            .map(|&l| self.op.eval_missing(l, Some(self.value)))
            .collect();

        debug!(
            op = ?self.op,
            left = %self.left_col_key,
            value = self.value,
            out = %self.out_col_key,
            "Applied constant arithmetic"
        );

        table.set_column(&self.out_col_key, out)?;
        Ok(table)
    }
}
