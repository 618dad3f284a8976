//! Manifest variants.
//!
//! The three manifest layouts share one pipeline and differ only in their header map, the
//! columns pruned after renaming, and the numeric coercions applied.

use std::fmt;
use std::str::FromStr;

use crate::error::ConvertResult;
use crate::headers::{HeaderMap, CSV_HEADERS, EXCEL_HEADERS, EXCEL_PRUNED_HEADERS};
use crate::ingestion::InputFormat;
use crate::processing::coerce::Coercion;

/// Fields removed from pruning variants before output.
pub const PRUNED_COLUMNS: &[&str] = &[
    "direction",
    "tnved_group_name",
    "shipper_inn",
    "shipper_name_unified",
    "destination_country",
];

/// Per-field coercions for the CSV variant.
pub const CSV_COERCIONS: &[(&str, Coercion)] = &[
    ("year", Coercion::Integer),
    ("month", Coercion::Integer),
    ("teu", Coercion::Integer),
    ("container_size", Coercion::Integer),
    ("tnved_group_id", Coercion::IntegerString),
];

/// A manifest layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Workbook with import/export/cabotage normalization.
    Excel,
    /// Workbook with sensitive columns pruned.
    ExcelPruned,
    /// CSV with sensitive columns pruned and numeric coercion.
    Csv,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Excel, Variant::ExcelPruned, Variant::Csv];

    /// Default variant for an input format.
    pub fn for_format(format: InputFormat) -> Self {
        match format {
            InputFormat::Csv => Self::Csv,
            InputFormat::Excel => Self::Excel,
        }
    }

    /// Input format this variant reads.
    pub fn input_format(self) -> InputFormat {
        match self {
            Self::Excel | Self::ExcelPruned => InputFormat::Excel,
            Self::Csv => InputFormat::Csv,
        }
    }

    pub fn header_table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Excel => EXCEL_HEADERS,
            Self::ExcelPruned => EXCEL_PRUNED_HEADERS,
            Self::Csv => CSV_HEADERS,
        }
    }

    /// Validated header map for this variant.
    pub fn header_map(self) -> ConvertResult<HeaderMap> {
        HeaderMap::new(self.header_table().iter().copied())
    }

    pub fn pruned_columns(self) -> &'static [&'static str] {
        match self {
            Self::Excel => &[],
            Self::ExcelPruned | Self::Csv => PRUNED_COLUMNS,
        }
    }

    pub fn coercions(self) -> &'static [(&'static str, Coercion)] {
        match self {
            Self::Excel | Self::ExcelPruned => &[],
            Self::Csv => CSV_COERCIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::ExcelPruned => "excel-pruned",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown variant '{s}' (expected one of: excel, excel-pruned, csv)")
            })
    }
}
