//! Core data model types for manifest conversion.
//!
//! A loaded manifest is an in-memory [`DataSet`]: an ordered list of column names plus
//! row-major [`Value`] storage. A single row zipped with the column names is a record
//! (see [`DataSet::records`]), which is what ends up as one JSON object in the output.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Column type picked by the CSV loader from a column's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// UTF-8 string.
    Utf8,
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value. Serialized as JSON `null`.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Shorthand for building a [`Value::Utf8`].
    pub fn text(s: impl Into<String>) -> Self {
        Self::Utf8(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string payload for [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Int64(v) => serializer.serialize_i64(*v),
            // JSON has no NaN/inf; those are normalized to null before output, but stay safe here.
            Self::Float64(v) if !v.is_finite() => serializer.serialize_none(),
            Self::Float64(v) => serializer.serialize_f64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as [`DataSet::columns`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at (`row`, `column`), if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.index_of(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Keep only rows that match `predicate`. Row order is preserved.
    pub fn retain_rows<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| predicate(row.as_slice()));
    }

    /// Apply `f` to every cell of the named column. No-op if the column is absent.
    ///
    /// Returns `true` if the column exists.
    pub fn update_column<F>(&mut self, name: &str, mut f: F) -> bool
    where
        F: FnMut(usize, &mut Value),
    {
        let Some(idx) = self.index_of(name) else {
            return false;
        };
        for (row_idx, row) in self.rows.iter_mut().enumerate() {
            if let Some(cell) = row.get_mut(idx) {
                f(row_idx, cell);
            }
        }
        true
    }

    /// Apply `f` to every cell in the dataset.
    pub fn update_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        for cell in self.rows.iter_mut().flatten() {
            f(cell);
        }
    }

    /// Remove a column and its values. Returns `false` if the column was absent.
    pub fn remove_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.index_of(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
        true
    }

    /// Set `name` to `value` on every row, appending the column if it does not exist yet.
    pub fn set_constant_column(&mut self, name: &str, value: Value) {
        match self.index_of(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_owned());
                for row in &mut self.rows {
                    row.push(value.clone());
                }
            }
        }
    }

    /// Iterate rows as records (column name → value, in column order).
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            columns: &self.columns,
            values,
        })
    }
}

/// Serializes as a JSON array of objects, one per row.
impl Serialize for DataSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for record in self.records() {
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}

/// A borrowed view of one row: an ordered mapping from column name to value.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Iterate `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
