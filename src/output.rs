//! JSON output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{ConvertError, ConvertResult};
use crate::processing::stamp::base_name;
use crate::types::DataSet;

const INDENT: &[u8] = b"    ";

/// `<output_dir>/<input base name>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.json", base_name(input)))
}

/// Encode records as a pretty-printed JSON array (4-space indent, non-ASCII kept as-is).
pub fn to_json_writer<W: Write>(writer: W, dataset: &DataSet) -> serde_json::Result<()> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = Serializer::with_formatter(writer, formatter);
    dataset.serialize(&mut ser)
}

/// Writes `dataset` to [`output_path`], replacing any existing file.
///
/// The output directory must already exist.
pub fn write_json(dataset: &DataSet, input: &Path, output_dir: &Path) -> ConvertResult<PathBuf> {
    let path = output_path(input, output_dir);
    let write_err = |source: std::io::Error| ConvertError::Write {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    to_json_writer(&mut writer, dataset).map_err(|e| {
        if e.is_io() {
            write_err(e.into())
        } else {
            ConvertError::Serialize(e)
        }
    })?;
    writer.flush().map_err(write_err)?;

    tracing::debug!(path = %path.display(), rows = dataset.row_count(), "wrote json");
    Ok(path)
}
