//! `Combine` pipeline step: fill a column's gaps from another column.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PostProcess;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::table::Table;

/// Write `left.or(right)` back to the left column, row by row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Combine {
    pub left_col_key: String,
    pub right_col_key: String,
}

impl PostProcess for Combine {
    fn name(&self) -> &'static str {
        "Combine"
    }

    fn apply(&self, mut table: Table, _diagnostics: &mut Diagnostics) -> Result<Table> {
        let left = table.column_checked(&self.left_col_key)?;
        let right = table.column_checked(&self.right_col_key)?;

        let mut taken = 0;
        let combined: Vec<Option<f64>> = left
            .iter()
            .zip(right)
            .map(|(&l, &r)| {
                if l.is_none() && r.is_some() {
                    taken += 1;
                }
                l.or(r)
            })
            .collect();

        debug!(
            left = %self.left_col_key,
            right = %self.right_col_key,
            taken_from_right = taken,
            "Combined columns"
        );

        table.set_column(&self.left_col_key, combined)?;
        Ok(table)
    }
}
