//! Provenance metadata appended to every record.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::types::{DataSet, Value};

/// Field holding the input file's base name.
pub const FILE_NAME_COLUMN: &str = "original_file_name";

/// Field holding the processing timestamp.
pub const PARSED_ON_COLUMN: &str = "original_file_parsed_on";

/// `strftime` format of [`PARSED_ON_COLUMN`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a record came from and when it was converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceMetadata {
    /// Base name of the input file (no directory component).
    pub file_name: String,
    /// Wall-clock time the conversion started, local timezone.
    pub parsed_on: NaiveDateTime,
}

impl ProvenanceMetadata {
    /// Build metadata for `input`; `parsed_on` is read once by the caller.
    pub fn new(input: &Path, parsed_on: NaiveDateTime) -> Self {
        Self {
            file_name: base_name(input),
            parsed_on,
        }
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn parsed_on_string(&self) -> String {
        self.parsed_on.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Final path component as UTF-8 (lossy), or the whole path if it has none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Sets both provenance fields on every row, appending the columns if needed.
pub fn stamp(dataset: &mut DataSet, meta: &ProvenanceMetadata) {
    dataset.set_constant_column(FILE_NAME_COLUMN, Value::text(meta.file_name.as_str()));
    dataset.set_constant_column(PARSED_ON_COLUMN, Value::Utf8(meta.parsed_on_string()));
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDate;

    use super::*;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap()
    }

    #[test]
    fn metadata_uses_base_name_and_fixed_format() {
        let meta = ProvenanceMetadata::new(Path::new("/data/in/manifest 01.xlsx"), fixed_time());
        assert_eq!(meta.file_name, "manifest 01.xlsx");
        assert_eq!(meta.parsed_on_string(), "2024-03-09 07:05:00");
    }

    #[test]
    fn stamp_appends_columns_to_every_row() {
        let mut ds = DataSet::new(
            vec!["year".into()],
            vec![vec![Value::Int64(2023)], vec![Value::Int64(2024)]],
        );
        let meta = ProvenanceMetadata::new(Path::new("a.csv"), fixed_time());
        stamp(&mut ds, &meta);

        assert_eq!(ds.columns, vec!["year", FILE_NAME_COLUMN, PARSED_ON_COLUMN]);
        for row in &ds.rows {
            assert_eq!(row[1], Value::text("a.csv"));
            assert_eq!(row[2], Value::text("2024-03-09 07:05:00"));
        }
    }
}
