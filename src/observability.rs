//! Conversion outcome hooks.
//!
//! The pipeline reports success, coercion warnings, and failures to an optional
//! [`ConversionObserver`]. [`TracingObserver`] forwards everything to `tracing`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ConvertError, LoadError};
use crate::processing::CoercionWarning;
use crate::variant::Variant;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (conversion failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl Severity {
    /// Classify a conversion failure.
    pub fn of(error: &ConvertError) -> Self {
        match error {
            ConvertError::Load { source, .. } => match source {
                LoadError::Io(_) => Self::Critical,
                LoadError::Csv(err) => match err.kind() {
                    ::csv::ErrorKind::Io(_) => Self::Critical,
                    _ => Self::Error,
                },
                #[cfg(feature = "excel")]
                LoadError::Excel(calamine::Error::Io(_)) => Self::Critical,
                _ => Self::Error,
            },
            ConvertError::Write { .. } => Self::Critical,
            ConvertError::MappingConfig { .. } | ConvertError::Serialize(_) => Self::Error,
        }
    }
}

/// Context about a conversion attempt.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    /// The input path.
    pub input: PathBuf,
    /// Variant used for the conversion.
    pub variant: Variant,
}

/// Counts reported on successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    /// Rows read from the input.
    pub rows_read: usize,
    /// Fully empty rows discarded.
    pub rows_dropped: usize,
    /// Records written to the output.
    pub rows_written: usize,
    /// Cells whose coercion failed.
    pub coercion_warnings: usize,
}

/// Observer interface for conversion outcomes.
pub trait ConversionObserver: Send + Sync {
    /// Called when the output file has been written.
    fn on_success(&self, _ctx: &ConversionContext, _stats: ConversionStats) {}

    /// Called once per cell that could not be coerced.
    fn on_coercion_warning(&self, _ctx: &ConversionContext, _warning: &CoercionWarning) {}

    /// Called when conversion fails.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: Severity, _error: &ConvertError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_coercion_warning(&self, ctx: &ConversionContext, warning: &CoercionWarning) {
        for o in &self.observers {
            o.on_coercion_warning(ctx, warning);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs conversion events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ConversionObserver for TracingObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        tracing::info!(
            input = %ctx.input.display(),
            variant = %ctx.variant,
            rows_read = stats.rows_read,
            rows_dropped = stats.rows_dropped,
            rows_written = stats.rows_written,
            coercion_warnings = stats.coercion_warnings,
            "conversion finished"
        );
    }

    fn on_coercion_warning(&self, ctx: &ConversionContext, warning: &CoercionWarning) {
        tracing::warn!(input = %ctx.input.display(), "coercion failed, keeping original: {warning}");
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        tracing::error!(
            input = %ctx.input.display(),
            variant = %ctx.variant,
            ?severity,
            error = error as &(dyn std::error::Error + 'static),
            "conversion failed"
        );
    }

    /// Only marks the failure already logged by [`Self::on_failure`] as alerting.
    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, _error: &ConvertError) {
        tracing::error!(
            alert = true,
            input = %ctx.input.display(),
            ?severity,
            "alert threshold reached"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::{ConversionContext, ConversionObserver, Severity, TracingObserver};
    use crate::error::{ConvertError, LoadError};
    use crate::variant::Variant;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn io_failures_are_critical() {
        let err = ConvertError::Load {
            path: PathBuf::from("x.csv"),
            source: LoadError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)),
        };
        assert_eq!(Severity::of(&err), Severity::Critical);

        let err = ConvertError::Write {
            path: PathBuf::from("out/x.csv.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(Severity::of(&err), Severity::Critical);
    }

    #[test]
    fn format_and_mapping_failures_are_errors() {
        let err = ConvertError::Load {
            path: PathBuf::from("x.txt"),
            source: LoadError::UnsupportedFormat {
                message: "txt".to_string(),
            },
        };
        assert_eq!(Severity::of(&err), Severity::Error);

        let err = ConvertError::MappingConfig {
            message: "dup".to_string(),
        };
        assert_eq!(Severity::of(&err), Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn tracing_observer_logs_an_alerted_failure_once() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let ctx = ConversionContext {
            input: PathBuf::from("missing.csv"),
            variant: Variant::Csv,
        };
        let err = ConvertError::Load {
            path: PathBuf::from("missing.csv"),
            source: LoadError::Io(io::Error::new(io::ErrorKind::NotFound, "no such manifest")),
        };
        let severity = Severity::of(&err);

        tracing::subscriber::with_default(subscriber, || {
            TracingObserver.on_failure(&ctx, severity, &err);
            TracingObserver.on_alert(&ctx, severity, &err);
        });

        let text = log.text();
        assert_eq!(text.matches("conversion failed").count(), 1, "{text}");
        assert_eq!(text.matches("no such manifest").count(), 1, "{text}");
        assert_eq!(text.matches("alert=true").count(), 1, "{text}");
    }
}
