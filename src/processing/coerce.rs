//! Best-effort numeric coercion.
//!
//! Each cell is tried individually; a cell that cannot be converted keeps its original value
//! and yields a [`CoercionWarning`] instead of an error.

use crate::types::{DataSet, Value};

/// Target representation for a coerced field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Integer value (floats are truncated toward zero).
    Integer,
    /// Integer rendered as text, e.g. `"05"` → `"5"`.
    IntegerString,
}

/// Outcome of coercing a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// The value was converted.
    Converted(Value),
    /// The value already had the target shape (or was null).
    Unchanged,
    /// The value could not be converted; the reason is attached.
    Failed(String),
}

/// A value that could not be coerced. Processing continues with the original value.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionWarning {
    /// 1-based data row (header excluded).
    ///
    /// [`apply_coercions`] counts rows of the dataset it is given; the pipeline renumbers them
    /// to the input's data rows, empty rows included.
    pub row: usize,
    pub column: String,
    pub value: Value,
    pub message: String,
}

impl std::fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "data row {} column '{}': {} (value={:?})",
            self.row, self.column, self.message, self.value
        )
    }
}

/// Try to convert `value` according to `coercion`.
pub fn coerce_value(value: &Value, coercion: Coercion) -> Coerced {
    let int = match value {
        Value::Null => return Coerced::Unchanged,
        Value::Int64(v) => Ok(*v),
        Value::Float64(f) => float_to_int(*f),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Utf8(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("not an integer: {e}")),
    };

    match (int, coercion) {
        (Err(message), _) => Coerced::Failed(message),
        (Ok(_), Coercion::Integer) if matches!(value, Value::Int64(_)) => Coerced::Unchanged,
        (Ok(v), Coercion::Integer) => Coerced::Converted(Value::Int64(v)),
        (Ok(v), Coercion::IntegerString) => {
            let rendered = v.to_string();
            if value.as_str() == Some(rendered.as_str()) {
                Coerced::Unchanged
            } else {
                Coerced::Converted(Value::Utf8(rendered))
            }
        }
    }
}

fn float_to_int(f: f64) -> Result<i64, String> {
    if !f.is_finite() || f.trunc() < i64::MIN as f64 || f.trunc() > i64::MAX as f64 {
        return Err(format!("float {f} is out of integer range"));
    }
    Ok(f.trunc() as i64)
}

/// Applies `rules` to every listed column that exists in the dataset.
///
/// Returns one warning per cell that could not be converted.
pub fn apply_coercions(dataset: &mut DataSet, rules: &[(&str, Coercion)]) -> Vec<CoercionWarning> {
    let mut warnings = Vec::new();
    for (column, coercion) in rules {
        dataset.update_column(column, |row, cell| match coerce_value(cell, *coercion) {
            Coerced::Converted(v) => *cell = v,
            Coerced::Unchanged => {}
            Coerced::Failed(message) => warnings.push(CoercionWarning {
                row: row + 1,
                column: (*column).to_owned(),
                value: cell.clone(),
                message,
            }),
        });
    }
    warnings
}
