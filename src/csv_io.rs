//! CSV ingestion and export.
//!
//! The CSV layout is one header row, one time column and any number of
//! numeric columns. Empty cells and `NaN`/`null` spellings are missing.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{GapfillError, Result};
use crate::table::{Column, Table};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp as RFC 3339, or as a naive date-time taken to be UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way [`write_table`] emits it
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_value(raw: &str, row: usize, column: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() || matches!(raw, "NaN" | "nan" | "NAN" | "null" | "NULL" | "None") {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(|v| Some(v).filter(|v| !v.is_nan()))
        .map_err(|e| GapfillError::CsvValue {
            row,
            column: column.to_string(),
            message: format!("'{}' is not a number: {}", raw, e),
        })
}

/// Read a table from CSV.
///
/// `time_column` names the index column; `None` uses the first column.
/// Rows may arrive in any order and are sorted by timestamp.
pub fn read_table<R: Read>(reader: R, time_column: Option<&str>) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let time_idx = match time_column {
        Some(name) => headers.iter().position(|h| h == name).ok_or_else(|| {
            GapfillError::NotTimeIndexed {
                message: format!(
                    "time column '{}' not found, available columns: [{}]",
                    name,
                    headers.join(", ")
                ),
            }
        })?,
        None if headers.is_empty() => {
            return Err(GapfillError::NotTimeIndexed {
                message: "CSV has no columns".to_string(),
            })
        }
        None => 0,
    };

    let value_names: Vec<&String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != time_idx)
        .map(|(_, h)| h)
        .collect();

    let mut rows: Vec<(DateTime<Utc>, Vec<Option<f64>>)> = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        // Header is row 1
        let row = line + 2;

        let raw_ts = record.get(time_idx).unwrap_or_default();
        let ts = parse_timestamp(raw_ts).ok_or_else(|| GapfillError::NotTimeIndexed {
            message: format!(
                "row {}: '{}' in column '{}' is not a timestamp",
                row, raw_ts, headers[time_idx]
            ),
        })?;

        let mut values = Vec::with_capacity(value_names.len());
        for (i, raw) in record.iter().enumerate() {
            if i != time_idx {
                values.push(parse_value(raw, row, &headers[i])?);
            }
        }
        rows.push((ts, values));
    }

    rows.sort_by_key(|(ts, _)| *ts);
    if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(GapfillError::InvalidSeries {
            message: format!("duplicate timestamp {}", format_timestamp(&pair[0].0)),
        });
    }

    let mut columns: Vec<Column> = value_names
        .iter()
        .map(|name| Column::new(name.as_str(), Vec::with_capacity(rows.len())))
        .collect();
    let mut index = Vec::with_capacity(rows.len());
    for (ts, values) in rows {
        index.push(ts);
        for (column, value) in columns.iter_mut().zip(values) {
            column.values.push(value);
        }
    }

    debug!(
        rows = index.len(),
        columns = columns.len(),
        time_column = %headers[time_idx],
        "Parsed CSV table"
    );

    Table::new(index, columns)
}

/// Read a table from a CSV file
pub fn read_table_from_path(path: &Path, time_column: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(GapfillError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let table = read_table(File::open(path)?, time_column)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "Loaded CSV table"
    );
    Ok(table)
}

/// Write a table as CSV, missing values as empty cells
pub fn write_table<W: Write>(writer: W, table: &Table, time_column: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![time_column.to_string()];
    header.extend(table.column_names());
    wtr.write_record(&header)?;

    for (row, ts) in table.index().iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(format_timestamp(ts));
        for column in table.columns() {
            record.push(column.values[row].map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a table to a CSV file
pub fn write_table_to_path(path: &Path, table: &Table, time_column: &str) -> Result<()> {
    write_table(File::create(path)?, table, time_column)?;
    info!(path = %path.display(), rows = table.len(), "Wrote CSV table");
    Ok(())
}
