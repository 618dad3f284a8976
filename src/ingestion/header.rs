//! Header row and missing-value handling shared by the CSV and Excel loaders.

/// Cell contents treated as missing values (the pandas default NA set, plus `NaT`).
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "NaT", "None", "n/a", "nan", "null",
];

/// Returns true if a raw text cell should load as null.
pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

/// Normalizes raw header labels into unique column names.
///
/// - labels are trimmed
/// - empty labels become `Unnamed: <index>`
/// - repeated labels get a `.1`, `.2`, ... suffix in order of appearance
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for (idx, label) in raw.into_iter().enumerate() {
        let label = label.as_ref().trim();
        let base = if label.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            label.to_string()
        };

        let mut candidate = base.clone();
        let mut n = 1;
        while out.contains(&candidate) {
            candidate = format!("{base}.{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

/// Returns true if `column` must be loaded as text whatever its contents.
pub fn is_text_column(column: &str, text_columns: &[String]) -> bool {
    text_columns.iter().any(|c| c == column)
}

/// Render a float without a trailing `.0` when it holds an integral value.
pub fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
