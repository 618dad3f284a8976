//! Column renaming through a [`HeaderMap`].

use std::collections::HashSet;

use crate::error::{ConvertError, ConvertResult};
use crate::headers::HeaderMap;
use crate::types::DataSet;

/// Renames every mapped column; unmapped columns keep their label.
///
/// Source labels absent from the dataset are ignored. If renaming would leave two columns
/// with the same name (e.g. the input already has a `year` column next to `Год`), nothing is
/// changed and a [`ConvertError::MappingConfig`] is returned.
///
/// Returns the number of renamed columns.
pub fn rename_columns(dataset: &mut DataSet, map: &HeaderMap) -> ConvertResult<usize> {
    let renamed: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| map.rename(c).to_owned())
        .collect();

    {
        let mut seen: HashSet<&str> = HashSet::with_capacity(renamed.len());
        for (source, target) in dataset.columns.iter().zip(renamed.iter()) {
            if !seen.insert(target.as_str()) {
                return Err(ConvertError::MappingConfig {
                    message: format!("column '{source}' renames to '{target}', which already exists"),
                });
            }
        }
    }

    let count = dataset
        .columns
        .iter()
        .zip(renamed.iter())
        .filter(|(a, b)| a != b)
        .count();
    dataset.columns = renamed;
    Ok(count)
}
