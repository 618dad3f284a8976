//! End-to-end conversion of one manifest file.
//!
//! ```no_run
//! use manifest_flatten::pipeline::{convert_file, ConvertOptions};
//!
//! # fn main() -> Result<(), manifest_flatten::ConvertError> {
//! let summary = convert_file("nw_2023.xlsx", "out/", &ConvertOptions::default())?;
//! println!("wrote {} records to {}", summary.rows_written, summary.output.display());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::error::{ConvertError, ConvertResult};
use crate::ingestion::{ingest_from_path, InputFormat, LoadOptions};
use crate::observability::{
    ConversionContext, ConversionObserver, ConversionStats, Severity, TracingObserver,
};
use crate::output::write_json;
use crate::processing::{
    apply_coercions, drop_columns, normalize, rename_columns, retain_non_empty_rows, stamp,
    CoercionWarning, ProvenanceMetadata,
};
use crate::types::DataSet;
use crate::variant::Variant;

/// Options controlling a conversion run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ConvertOptions {
    /// If `None`, the variant follows the input format (CSV → `csv`, workbook → `excel`).
    pub variant: Option<Variant>,
    /// Loader options.
    pub load: LoadOptions,
    /// Observer for outcomes and coercion warnings.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("variant", &self.variant)
            .field("load", &self.load)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            variant: None,
            load: LoadOptions::default(),
            observer: Some(Arc::new(TracingObserver)),
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub variant: Variant,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
    /// Cells left unconverted by best-effort coercion.
    pub warnings: Vec<CoercionWarning>,
    /// Path of the written JSON file.
    pub output: PathBuf,
}

/// Result of running the in-memory stages on a loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub dataset: DataSet,
    pub rows_dropped: usize,
    pub warnings: Vec<CoercionWarning>,
}

/// Runs every in-memory stage for `variant`: filter, rename, normalize, coerce, prune, stamp.
pub fn transform(
    mut dataset: DataSet,
    variant: Variant,
    meta: &ProvenanceMetadata,
) -> ConvertResult<Transformed> {
    let header_map = variant.header_map()?;

    let rows_before = dataset.row_count();
    let kept = retain_non_empty_rows(&mut dataset);
    let rows_dropped = rows_before - kept.len();
    let renamed = rename_columns(&mut dataset, &header_map)?;
    tracing::debug!(rows_dropped, renamed, columns = dataset.columns.len(), "rows filtered and renamed");

    normalize(&mut dataset);
    let mut warnings = apply_coercions(&mut dataset, variant.coercions());
    for warning in &mut warnings {
        if let Some(original) = warning.row.checked_sub(1).and_then(|idx| kept.get(idx)) {
            warning.row = original + 1;
        }
    }
    let pruned = drop_columns(&mut dataset, variant.pruned_columns());
    stamp(&mut dataset, meta);
    tracing::debug!(pruned, warnings = warnings.len(), "values normalized");

    Ok(Transformed {
        dataset,
        rows_dropped,
        warnings,
    })
}

/// Converts `input` into `<output_dir>/<input base name>.json`.
///
/// The clock is read once here and used for every record.
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &ConvertOptions,
) -> ConvertResult<ConversionSummary> {
    convert_file_at(input, output_dir, options, Local::now().naive_local())
}

/// Same as [`convert_file`] with an explicit processing timestamp.
pub fn convert_file_at(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &ConvertOptions,
    parsed_on: NaiveDateTime,
) -> ConvertResult<ConversionSummary> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let variant = resolve_variant(input, options);
    let ctx = ConversionContext {
        input: input.to_path_buf(),
        variant,
    };

    let result = run(input, output_dir, variant, options, parsed_on);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(summary) => {
                for w in &summary.warnings {
                    obs.on_coercion_warning(&ctx, w);
                }
                obs.on_success(
                    &ctx,
                    ConversionStats {
                        rows_read: summary.rows_read,
                        rows_dropped: summary.rows_dropped,
                        rows_written: summary.rows_written,
                        coercion_warnings: summary.warnings.len(),
                    },
                );
            }
            Err(e) => {
                let sev = Severity::of(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn resolve_variant(input: &Path, options: &ConvertOptions) -> Variant {
    if let Some(v) = options.variant {
        return v;
    }
    let format = options
        .load
        .format
        .or_else(|| InputFormat::from_path(input).ok())
        .unwrap_or(InputFormat::Csv);
    Variant::for_format(format)
}

fn run(
    input: &Path,
    output_dir: &Path,
    variant: Variant,
    options: &ConvertOptions,
    parsed_on: NaiveDateTime,
) -> ConvertResult<ConversionSummary> {
    // Fail on a broken header map before touching the input.
    variant.header_map()?;

    let mut load = options.load.clone();
    if load.format.is_none() && options.variant.is_some() {
        load.format = InputFormat::from_path(input).ok().or(Some(variant.input_format()));
    }

    let dataset = ingest_from_path(input, &load).map_err(|source| ConvertError::Load {
        path: input.to_path_buf(),
        source,
    })?;
    let rows_read = dataset.row_count();
    tracing::info!(input = %input.display(), %variant, rows = rows_read, columns = dataset.columns.len(), "loaded");

    let meta = ProvenanceMetadata::new(input, parsed_on);
    let Transformed {
        dataset,
        rows_dropped,
        warnings,
    } = transform(dataset, variant, &meta)?;

    let output = write_json(&dataset, input, output_dir)?;

    Ok(ConversionSummary {
        variant,
        rows_read,
        rows_dropped,
        rows_written: dataset.row_count(),
        warnings,
        output,
    })
}
