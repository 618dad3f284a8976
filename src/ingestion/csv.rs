//! CSV loading implementation.

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, DataType, Value};

use super::header::{is_missing_marker, is_text_column, normalize_headers};

/// Load a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Missing-value markers (see [`super::header::MISSING_MARKERS`]) load as [`Value::Null`].
/// - Columns listed in `text_columns` are kept as text.
/// - Every other column gets an inferred type: integer if all non-null cells parse as `i64`,
///   float if they all parse as `f64`, text otherwise.
pub fn ingest_csv_from_path(
    path: impl AsRef<Path>,
    delimiter: u8,
    text_columns: &[String],
) -> LoadResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, text_columns)
}

/// Load CSV data from an existing CSV reader.
///
/// The reader should be configured with `has_headers(true)`; `flexible(true)` lets short
/// rows through (they are padded with nulls), long rows are rejected.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    text_columns: &[String],
) -> LoadResult<DataSet> {
    let columns = normalize_headers(rdr.headers()?.iter());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users, +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() > width {
            return Err(LoadError::Malformed {
                message: format!(
                    "row {user_row} has {} fields but the header has {width}",
                    record.len()
                ),
            });
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|raw| (!is_missing_marker(raw)).then(|| raw.to_owned()))
            .collect();
        row.resize(width, None);
        raw_rows.push(row);
    }

    let types: Vec<DataType> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if is_text_column(name, text_columns) {
                DataType::Utf8
            } else {
                infer_column_type(&raw_rows, idx)
            }
        })
        .collect();

    let rows: Vec<Vec<Value>> = raw_rows
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .zip(types.iter())
                .map(|(cell, data_type)| match cell {
                    None => Value::Null,
                    Some(raw) => typed_value(*data_type, raw),
                })
                .collect()
        })
        .collect();

    Ok(DataSet::new(columns, rows))
}

fn infer_column_type(rows: &[Vec<Option<String>>], idx: usize) -> DataType {
    let mut cells = rows.iter().filter_map(|r| r[idx].as_deref()).peekable();
    if cells.peek().is_none() {
        return DataType::Utf8;
    }

    let mut all_int = true;
    let mut all_float = true;
    for cell in cells {
        if all_int && cell.parse::<i64>().is_err() {
            all_int = false;
        }
        if !cell.parse::<f64>().is_ok_and(f64::is_finite) {
            all_float = false;
            break;
        }
    }

    if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

/// Numeric columns were checked during inference; text is only a fallback.
fn typed_value(data_type: DataType, raw: String) -> Value {
    match data_type {
        DataType::Utf8 => Value::Utf8(raw),
        DataType::Int64 => match raw.parse::<i64>() {
            Ok(v) => Value::Int64(v),
            Err(_) => Value::Utf8(raw),
        },
        DataType::Float64 => match raw.parse::<f64>() {
            Ok(v) => Value::Float64(v),
            Err(_) => Value::Utf8(raw),
        },
    }
}
