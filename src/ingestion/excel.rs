#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType as _, Reader};

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, Value};

use super::header::{format_number, is_missing_marker, is_text_column, normalize_headers};

/// Load one sheet of an Excel document (`.xlsx`, `.xls`, `.ods`, etc.) into an in-memory `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows and converts cells into `Value`s; `text_columns` are rendered as text
/// - An entirely empty sheet yields an empty `DataSet`
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    text_columns: &[String],
) -> LoadResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::Malformed {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(ingest_sheet_range(&range, text_columns))
}

fn ingest_sheet_range(range: &calamine::Range<Data>, text_columns: &[String]) -> DataSet {
    let Some((header_row_idx, columns)) = find_header_row(range) else {
        return DataSet::default();
    };
    let as_text: Vec<bool> = columns
        .iter()
        .map(|c| is_text_column(c, text_columns))
        .collect();

    let rows: Vec<Vec<Value>> = range
        .rows()
        .skip(header_row_idx + 1)
        .map(|row| {
            as_text
                .iter()
                .enumerate()
                .map(|(col_idx, text)| {
                    let cell = row.get(col_idx).unwrap_or(&Data::Empty);
                    if *text { text_cell(cell) } else { convert_cell(cell) }
                })
                .collect()
        })
        .collect();

    DataSet::new(columns, rows)
}

fn find_header_row(range: &calamine::Range<Data>) -> Option<(usize, Vec<String>)> {
    range.rows().enumerate().find_map(|(idx0, row)| {
        let non_empty = row.iter().any(|c| !matches!(c, Data::Empty));
        non_empty.then(|| (idx0, normalize_headers(row.iter().map(cell_text))))
    })
}

fn cell_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => format_datetime(c),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

/// Converts a cell keeping its native type.
///
/// Integral floats become integers; date cells become `YYYY-MM-DD HH:MM:SS` text; error cells
/// (`#N/A`, `#DIV/0!`, ...) and missing-value markers become null.
fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) if f.is_nan() => Value::Null,
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::Int64(*f as i64),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if is_missing_marker(s) => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::DateTime(_) => Value::Utf8(format_datetime(c)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Utf8(s.clone()),
    }
}

fn format_datetime(c: &Data) -> String {
    c.as_datetime()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| c.to_string())
}

/// Converts a cell of a text column: numbers are printed without a trailing `.0`.
fn text_cell(c: &Data) -> Value {
    match c {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if is_missing_marker(s) => Value::Null,
        _ => Value::Utf8(cell_text(c)),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Range};

    use super::{convert_cell, ingest_sheet_range, text_cell};
    use crate::types::Value;

    fn range_from(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    #[test]
    fn integral_floats_become_integers() {
        assert_eq!(convert_cell(&Data::Float(2023.0)), Value::Int64(2023));
        assert_eq!(convert_cell(&Data::Float(20.5)), Value::Float64(20.5));
        assert_eq!(convert_cell(&Data::String("NaT".into())), Value::Null);
    }

    #[test]
    fn header_row_and_text_column() {
        let range = range_from(vec![
            vec![Data::String("Год".into()), Data::String("ИНН".into())],
            vec![Data::Float(2023.0), Data::Float(7701234567.0)],
            vec![Data::Empty, Data::String("0012".into())],
        ]);
        let text = vec!["ИНН".to_string()];

        let ds = ingest_sheet_range(&range, &text);
        assert_eq!(ds.columns, vec!["Год", "ИНН"]);
        assert_eq!(ds.rows[0], vec![Value::Int64(2023), Value::text("7701234567")]);
        assert_eq!(ds.rows[1], vec![Value::Null, Value::text("0012")]);
    }

    #[test]
    fn header_is_first_non_empty_row() {
        let range = range_from(vec![
            vec![Data::Empty, Data::Empty],
            vec![Data::String("Судно".into()), Data::String("Рейс".into())],
            vec![Data::String("Ship A".into()), Data::Int(7)],
        ]);

        let ds = ingest_sheet_range(&range, &[]);
        assert_eq!(ds.columns, vec!["Судно", "Рейс"]);
        assert_eq!(ds.rows, vec![vec![Value::text("Ship A"), Value::Int64(7)]]);
    }

    #[test]
    fn text_cells_null_out_errors_and_markers() {
        assert_eq!(text_cell(&Data::Empty), Value::Null);
        assert_eq!(text_cell(&Data::String("NaN".into())), Value::Null);
        assert_eq!(text_cell(&Data::Int(42)), Value::text("42"));
    }
}
