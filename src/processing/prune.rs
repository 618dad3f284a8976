use crate::types::DataSet;

/// Removes the named columns if present. Returns how many were actually removed.
pub fn drop_columns(dataset: &mut DataSet, names: &[&str]) -> usize {
    names
        .iter()
        .filter(|name| dataset.remove_column(name))
        .count()
}
