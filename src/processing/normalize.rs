//! Cell-level normalization applied after renaming.

use crate::types::{DataSet, Value};

/// Field holding the shipment direction.
pub const DIRECTION_COLUMN: &str = "direction";

/// Fields filled with [`NO_DATA`] when null.
pub const DEFAULT_FILL_COLUMNS: &[&str] = &["ship_name", "voyage"];

/// Fallback written into null ship/voyage cells ("no data").
pub const NO_DATA: &str = "Нет данных";

/// Text placeholder for a missing timestamp left behind by older exports.
pub const NOT_A_TIME: &str = "NaT";

/// Source-language direction labels and their English codes.
pub const DIRECTIONS: &[(&str, &str)] = &[
    ("импорт", "import"),
    ("экспорт", "export"),
    ("каботаж", "cabotage"),
];

/// Runs every normalization step in order: trim, nulls, direction, default-fill.
pub fn normalize(dataset: &mut DataSet) {
    dataset.update_cells(|cell| {
        trim_value(cell);
        normalize_null(cell);
    });
    map_directions(dataset);
    fill_defaults(dataset);
}

/// Strips leading and trailing whitespace from text values in place.
pub fn trim_value(value: &mut Value) {
    if let Value::Utf8(s) = value {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_owned();
        }
    }
}

/// Replaces `NaN` floats and the literal `"NaT"` with [`Value::Null`].
pub fn normalize_null(value: &mut Value) {
    let is_missing = match value {
        Value::Float64(f) => f.is_nan(),
        Value::Utf8(s) => s == NOT_A_TIME,
        _ => false,
    };
    if is_missing {
        *value = Value::Null;
    }
}

/// English code for a direction label, if it is one of the known labels.
pub fn direction_code(label: &str) -> Option<&'static str> {
    DIRECTIONS
        .iter()
        .find(|(ru, _)| *ru == label)
        .map(|(_, en)| *en)
}

/// Rewrites known direction labels in the `direction` column; other values pass through.
///
/// Returns the number of cells rewritten.
pub fn map_directions(dataset: &mut DataSet) -> usize {
    let mut mapped = 0;
    dataset.update_column(DIRECTION_COLUMN, |_, cell| {
        let code = cell.as_str().and_then(direction_code);
        if let Some(code) = code {
            *cell = Value::text(code);
            mapped += 1;
        }
    });
    mapped
}

/// Fills null `ship_name` / `voyage` cells with [`NO_DATA`]. Absent columns are not created.
///
/// Returns the number of cells filled.
pub fn fill_defaults(dataset: &mut DataSet) -> usize {
    let mut filled = 0;
    for column in DEFAULT_FILL_COLUMNS {
        dataset.update_column(column, |_, cell| {
            if cell.is_null() {
                *cell = Value::text(NO_DATA);
                filled += 1;
            }
        });
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds(columns: &[&str], rows: Vec<Vec<Value>>) -> DataSet {
        DataSet::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn trim_is_idempotent_and_skips_non_text() {
        for raw in ["  Ship A  ", "\tVoyage\n", "CSYTVS134948", "   ", ""] {
            let mut once = Value::text(raw);
            trim_value(&mut once);
            let mut twice = once.clone();
            trim_value(&mut twice);
            assert_eq!(once, twice);
            assert_eq!(once, Value::text(raw.trim()));
        }

        let mut n = Value::Int64(7);
        trim_value(&mut n);
        assert_eq!(n, Value::Int64(7));
    }

    #[test]
    fn nat_and_nan_become_null() {
        let mut v = Value::text("NaT");
        normalize_null(&mut v);
        assert_eq!(v, Value::Null);

        let mut v = Value::Float64(f64::NAN);
        normalize_null(&mut v);
        assert_eq!(v, Value::Null);

        let mut v = Value::text("NaTalia");
        normalize_null(&mut v);
        assert_eq!(v, Value::text("NaTalia"));
    }

    #[test]
    fn direction_mapping_is_total_over_known_labels() {
        let mut data = ds(
            &["direction"],
            vec![
                vec![Value::text("импорт")],
                vec![Value::text("экспорт")],
                vec![Value::text("каботаж")],
                vec![Value::text("транзит")],
                vec![Value::Null],
            ],
        );
        assert_eq!(map_directions(&mut data), 3);
        let got: Vec<Value> = data.rows.into_iter().map(|r| r[0].clone()).collect();
        assert_eq!(
            got,
            vec![
                Value::text("import"),
                Value::text("export"),
                Value::text("cabotage"),
                Value::text("транзит"),
                Value::Null,
            ]
        );
    }

    #[test]
    fn fills_null_ship_and_voyage_only() {
        let mut data = ds(
            &["ship_name", "voyage", "line"],
            vec![vec![Value::Null, Value::Null, Value::Null]],
        );
        assert_eq!(fill_defaults(&mut data), 2);
        assert_eq!(
            data.rows[0],
            vec![Value::text(NO_DATA), Value::text(NO_DATA), Value::Null]
        );
    }

    #[test]
    fn fill_does_not_create_missing_columns() {
        let mut data = ds(&["line"], vec![vec![Value::Null]]);
        assert_eq!(fill_defaults(&mut data), 0);
        assert_eq!(data.columns, vec!["line"]);
    }

    #[test]
    fn normalize_trims_before_matching_directions() {
        let mut data = ds(
            &["direction", "ship_name"],
            vec![vec![Value::text(" импорт "), Value::text("NaT")]],
        );
        normalize(&mut data);
        assert_eq!(
            data.rows[0],
            vec![Value::text("import"), Value::text(NO_DATA)]
        );
    }
}
