use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience result type for the conversion pipeline.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error type returned by the loaders.
///
/// This is a single error enum shared across CSV and (optional) Excel loading. Wrapped library
/// errors are transparent, so an error chain names each cause once.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel loading error (feature-gated behind `excel`).
    #[error(transparent)]
    Excel(#[from] calamine::Error),

    /// CSV loading error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The input format could not be determined or is not enabled in this build.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The input opened fine but its layout is unusable (no header row, ragged rows, ...).
    #[error("malformed input: {message}")]
    Malformed { message: String },
}

/// Error type returned by the conversion pipeline.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be loaded.
    #[error("failed to load {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// A header map renames two columns to the same target name.
    #[error("header mapping error: {message}")]
    MappingConfig { message: String },

    /// The output file could not be created or written.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The records could not be encoded as JSON.
    #[error("failed to serialize records")]
    Serialize(#[from] serde_json::Error),
}
