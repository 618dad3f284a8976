//! Unified loading entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which loads a manifest file into an in-memory
//! [`crate::types::DataSet`].
//!
//! - If [`LoadOptions::format`] is `None`, the input format is inferred from the file extension.
//! - Columns listed in [`LoadOptions::text_columns`] are loaded as text instead of the inferred
//!   type (by default the `ИНН` tax id, so leading zeros survive).

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::DataSet;

use super::csv;

/// Source label of the company tax id column, always loaded as text.
pub const TAX_ID_COLUMN: &str = "ИНН";

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl InputFormat {
    /// Parse an input format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoadError::UnsupportedFormat {
                message: format!(
                    "cannot infer format: path has no extension ({})",
                    path.display()
                ),
            })?;

        Self::from_extension(ext).ok_or_else(|| LoadError::UnsupportedFormat {
            message: format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ),
        })
    }
}

/// How to choose the sheet when loading an Excel workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExcelSheetSelection {
    /// Load the first sheet (default).
    #[default]
    First,
    /// Load a single named sheet.
    Sheet(String),
}

/// Options controlling how a manifest file is loaded.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<InputFormat>,
    /// Excel-specific options.
    pub excel_sheet_selection: ExcelSheetSelection,
    /// Source columns always loaded as text, whatever their contents.
    pub text_columns: Vec<String>,
    /// CSV field delimiter.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet_selection: ExcelSheetSelection::default(),
            text_columns: vec![TAX_ID_COLUMN.to_string()],
            delimiter: b',',
        }
    }
}

/// Unified load entry point for path-based sources.
///
/// # Examples
///
/// ```no_run
/// use manifest_flatten::ingestion::{ingest_from_path, LoadOptions};
///
/// # fn main() -> Result<(), manifest_flatten::LoadError> {
/// // Uses `.csv` to select CSV loading.
/// let ds = ingest_from_path("manifest.csv", &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// Force a format explicitly when the file has no usable extension:
///
/// ```no_run
/// use manifest_flatten::ingestion::{ingest_from_path, InputFormat, LoadOptions};
///
/// # fn main() -> Result<(), manifest_flatten::LoadError> {
/// let opts = LoadOptions {
///     format: Some(InputFormat::Csv),
///     ..Default::default()
/// };
/// let ds = ingest_from_path("manifest_export", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => InputFormat::from_path(path)?,
    };

    match fmt {
        InputFormat::Csv => csv::ingest_csv_from_path(path, options.delimiter, &options.text_columns),
        InputFormat::Excel => ingest_excel_dispatch(path, options),
    }
}

fn ingest_excel_dispatch(path: &Path, options: &LoadOptions) -> LoadResult<DataSet> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, options);

    #[cfg(feature = "excel")]
    {
        use super::excel;

        let sheet = match &options.excel_sheet_selection {
            ExcelSheetSelection::First => None,
            ExcelSheetSelection::Sheet(name) => Some(name.as_str()),
        };
        excel::ingest_excel_from_path(path, sheet, &options.text_columns)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(LoadError::UnsupportedFormat {
            message: "excel loading not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
