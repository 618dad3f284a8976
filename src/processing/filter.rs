//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Removes rows whose every value is [`Value::Null`]. Row order is preserved.
///
/// Returns the number of rows removed.
pub fn drop_empty_rows(dataset: &mut DataSet) -> usize {
    let before = dataset.row_count();
    before - retain_non_empty_rows(dataset).len()
}

/// Same as [`drop_empty_rows`], but returns the original 0-based index of every kept row.
pub fn retain_non_empty_rows(dataset: &mut DataSet) -> Vec<usize> {
    let kept: Vec<usize> = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !is_empty_row(row))
        .map(|(idx, _)| idx)
        .collect();
    dataset.retain_rows(|row| !is_empty_row(row));
    kept
}

fn is_empty_row(row: &[Value]) -> bool {
    row.iter().all(Value::is_null)
}
