//! Time-indexed table threaded through the post-processing pipeline.
//!
//! A [`Table`] holds a strictly increasing timestamp index and any number
//! of named numeric columns, each with exactly one (possibly missing)
//! value per index entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{GapfillError, Result};
use crate::series::Series;

/// A named column of values aligned with the table index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect(),
        }
    }
}

/// The table shared by all pipeline operations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, checking the index order and column lengths
    pub fn new(index: Vec<DateTime<Utc>>, columns: Vec<Column>) -> Result<Self> {
        if let Some(pos) = index.windows(2).position(|w| w[0] >= w[1]) {
            return Err(GapfillError::NotTimeIndexed {
                message: format!(
                    "index must be strictly increasing, but row {} ({}) is not after row {} ({})",
                    pos + 1,
                    index[pos + 1],
                    pos,
                    index[pos]
                ),
            });
        }

        for (i, column) in columns.iter().enumerate() {
            if column.values.len() != index.len() {
                return Err(GapfillError::InvalidParameter {
                    param: column.name.clone(),
                    message: format!(
                        "column has {} values but the index has {} rows",
                        column.values.len(),
                        index.len()
                    ),
                });
            }
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(GapfillError::InvalidParameter {
                    param: column.name.clone(),
                    message: "duplicate column name".to_string(),
                });
            }
        }

        Ok(Self { index, columns })
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Get a column's values
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Get a column's values with error handling
    pub fn column_checked(&self, name: &str) -> Result<&[Option<f64>]> {
        self.column(name)
            .ok_or_else(|| GapfillError::ColumnNotFound {
                column: name.to_string(),
                available: self.column_names(),
            })
    }

    /// Fail if the table has no rows
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(GapfillError::EmptyTable);
        }
        Ok(())
    }

    /// Extract a column as a series over the full index
    pub fn series(&self, name: &str) -> Result<Series> {
        let values = self.column_checked(name)?;
        Series::from_parts(&self.index, values)
    }

    /// Insert a column, or overwrite it if it already exists
    pub fn set_column(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.index.len() {
            return Err(GapfillError::InvalidParameter {
                param: name.to_string(),
                message: format!(
                    "column has {} values but the index has {} rows",
                    values.len(),
                    self.index.len()
                ),
            });
        }

        let column = Column::new(name, values);
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Replace a column with a series that may live on a different timeline.
    ///
    /// The index becomes the union of the current index and the series'
    /// timestamps. The replaced column keeps its position; every other
    /// column is missing at timestamps that were not in the index before.
    pub fn replace_with_series(&mut self, name: &str, series: &Series) -> Result<()> {
        let position = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| GapfillError::ColumnNotFound {
                column: name.to_string(),
                available: self.column_names(),
            })?;

        let points = series.points();
        let mut index = Vec::with_capacity(self.index.len().max(points.len()));
        // (row in the old index, position in the series) for every new row
        let mut sources: Vec<(Option<usize>, Option<usize>)> = Vec::with_capacity(index.capacity());
        let (mut i, mut j) = (0, 0);

        while i < self.index.len() || j < points.len() {
            let order = match (self.index.get(i), points.get(j)) {
                (Some(ts), Some(p)) => ts.cmp(&p.timestamp),
                (Some(_), None) => Ordering::Less,
                (None, _) => Ordering::Greater,
            };
            match order {
                Ordering::Less => {
                    index.push(self.index[i]);
                    sources.push((Some(i), None));
                    i += 1;
                }
                Ordering::Equal => {
                    index.push(self.index[i]);
                    sources.push((Some(i), Some(j)));
                    i += 1;
                    j += 1;
                }
                Ordering::Greater => {
                    index.push(points[j].timestamp);
                    sources.push((None, Some(j)));
                    j += 1;
                }
            }
        }

        for (c, column) in self.columns.iter_mut().enumerate() {
            column.values = if c == position {
                sources
                    .iter()
                    .map(|&(_, s)| s.and_then(|s| points[s].value))
                    .collect()
            } else {
                sources
                    .iter()
                    .map(|&(row, _)| row.and_then(|row| column.values[row]))
                    .collect()
            };
        }
        self.index = index;

        Ok(())
    }
}
