//! `manifest-flatten` converts container trade manifests (Excel workbooks or CSV files with
//! Russian column headers) into normalized JSON records with English field names.
//!
//! The primary entrypoint is [`pipeline::convert_file`], which runs the whole conversion for
//! one input file and writes `<output_dir>/<input base name>.json`.
//!
//! ## Pipeline
//!
//! 1. **Load** ([`ingestion`]): read the first sheet / the CSV into a [`types::DataSet`].
//!    The `ИНН` tax id column is always loaded as text.
//! 2. **Filter**: drop rows whose every cell is empty.
//! 3. **Rename** ([`headers`]): map Russian labels to English field names; unknown columns pass
//!    through unchanged.
//! 4. **Normalize**: trim text, turn `NaN`/`"NaT"` into null, map `direction` labels
//!    (импорт/экспорт/каботаж → import/export/cabotage), fill null `ship_name`/`voyage` with
//!    `"Нет данных"`.
//! 5. **Coerce** (CSV variant): `year`, `month`, `teu`, `container_size` to integers,
//!    `tnved_group_id` to an integer string. Failures keep the original value.
//! 6. **Prune** (pruning variants): drop `direction`, `tnved_group_name`, `shipper_inn`,
//!    `shipper_name_unified`, `destination_country`.
//! 7. **Stamp**: add `original_file_name` and `original_file_parsed_on`.
//! 8. **Write** ([`output`]): pretty-printed JSON array, 4-space indent, UTF-8.
//!
//! ## Variants
//!
//! | [`variant::Variant`] | input    | header map                         |
//! |----------------------|----------|------------------------------------|
//! | `Excel`              | workbook | [`headers::EXCEL_HEADERS`]         |
//! | `ExcelPruned`        | workbook | [`headers::EXCEL_PRUNED_HEADERS`]  |
//! | `Csv`                | CSV      | [`headers::CSV_HEADERS`]           |
//!
//! Excel support is behind the default-on cargo feature `excel`.
//!
//! ## Example
//!
//! ```no_run
//! use manifest_flatten::pipeline::{convert_file, ConvertOptions};
//! use manifest_flatten::variant::Variant;
//!
//! # fn main() -> Result<(), manifest_flatten::ConvertError> {
//! let opts = ConvertOptions {
//!     variant: Some(Variant::ExcelPruned),
//!     ..Default::default()
//! };
//! let summary = convert_file("export_2023.xlsx", "out", &opts)?;
//! assert_eq!(summary.rows_read, summary.rows_written + summary.rows_dropped);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod headers;
pub mod ingestion;
pub mod logging;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod types;
pub mod variant;

pub use error::{ConvertError, ConvertResult, LoadError, LoadResult};
