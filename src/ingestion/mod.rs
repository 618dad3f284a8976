//! Loading entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which auto-detects the
//! format by file extension (or you can override it via [`LoadOptions`]) and loads the first
//! sheet / whole CSV into an in-memory [`crate::types::DataSet`].
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod header;
pub mod unified;

pub use unified::{ingest_from_path, ExcelSheetSelection, InputFormat, LoadOptions, TAX_ID_COLUMN};
