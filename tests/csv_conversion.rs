use std::path::Path;

use chrono::NaiveDateTime;
use serde_json::Value as Json;

use manifest_flatten::ingestion::{ingest_from_path, InputFormat, LoadOptions};
use manifest_flatten::pipeline::{convert_file, ConvertOptions};
use manifest_flatten::processing::drop_empty_rows;
use manifest_flatten::types::Value;
use manifest_flatten::variant::Variant;
use manifest_flatten::ConvertError;

const FIXTURE: &str = "tests/fixtures/manifest.csv";

fn quiet_options() -> ConvertOptions {
    ConvertOptions {
        observer: None,
        ..Default::default()
    }
}

fn error_chain(err: ConvertError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

fn convert_fixture(path: &str) -> (tempfile::TempDir, Vec<Json>) {
    let out = tempfile::tempdir().unwrap();
    let summary = convert_file(path, out.path(), &quiet_options()).unwrap();
    let text = std::fs::read_to_string(&summary.output).unwrap();
    let records: Vec<Json> = serde_json::from_str(&text).unwrap();
    (out, records)
}

#[test]
fn csv_manifest_converts_end_to_end() {
    let out = tempfile::tempdir().unwrap();
    let summary = convert_file(FIXTURE, out.path(), &quiet_options()).unwrap();

    assert_eq!(summary.variant, Variant::Csv);
    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.rows_dropped, 1);
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.output, out.path().join("manifest.csv.json"));
    assert!(summary.output.exists());
}

#[test]
fn output_records_are_coerced_trimmed_and_pruned() {
    let (_out, records) = convert_fixture(FIXTURE);
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first["year"], 2023);
    assert_eq!(first["month"], 1);
    assert_eq!(first["teu"], 2);
    assert_eq!(first["container_size"], 40);
    assert_eq!(first["tnved_group_id"], "5");
    assert_eq!(first["destination_port"], "Шанхай");
    assert_eq!(first["goods_weight_netto"], 1200.5);
    assert_eq!(first["Примечание"], Json::Null);

    for pruned in [
        "direction",
        "tnved_group_name",
        "shipper_inn",
        "shipper_name_unified",
        "destination_country",
    ] {
        assert!(first.get(pruned).is_none(), "{pruned} should be pruned");
    }

    let second = &records[1];
    assert_eq!(second["goods_weight_netto"], Json::Null);
    assert_eq!(second["Примечание"], "срочно");

    // Coercion failure keeps the original text.
    let third = &records[2];
    assert_eq!(third["year"], "abc");
    assert_eq!(third["tnved_group_id"], Json::Null);
}

#[test]
fn coercion_failures_are_reported_not_fatal() {
    let out = tempfile::tempdir().unwrap();
    let summary = convert_file(FIXTURE, out.path(), &quiet_options()).unwrap();

    assert_eq!(summary.warnings.len(), 1);
    // Fourth data row of the input; the blank second row still counts.
    assert_eq!(summary.warnings[0].row, 4);
    assert_eq!(summary.warnings[0].column, "year");
    assert_eq!(summary.warnings[0].value, Value::text("abc"));
}

#[test]
fn every_record_carries_provenance() {
    let (_out, records) = convert_fixture(FIXTURE);
    for record in &records {
        assert_eq!(record["original_file_name"], "manifest.csv");
        let stamp = record["original_file_parsed_on"].as_str().unwrap();
        assert_eq!(stamp.len(), 19);
        assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}

#[test]
fn mapped_headers_present_in_every_record() {
    let (_out, records) = convert_fixture(FIXTURE);
    let map = Variant::Csv.header_map().unwrap();
    let ds = ingest_from_path(FIXTURE, &LoadOptions::default()).unwrap();

    for source in &ds.columns {
        let Some(target) = map.target(source) else {
            continue;
        };
        if Variant::Csv.pruned_columns().contains(&target) {
            continue;
        }
        for record in &records {
            assert!(record.get(target).is_some(), "missing {target}");
        }
    }
}

#[test]
fn row_count_is_input_minus_empty_rows() {
    let mut ds = ingest_from_path(FIXTURE, &LoadOptions::default()).unwrap();
    let input_rows = ds.row_count();
    let empty = drop_empty_rows(&mut ds);

    let (_out, records) = convert_fixture(FIXTURE);
    assert_eq!(records.len(), input_rows - empty);
}

#[test]
fn tax_id_is_loaded_as_text() {
    let ds = ingest_from_path(FIXTURE, &LoadOptions::default()).unwrap();
    assert_eq!(ds.get(0, "ИНН"), Some(&Value::text("0012345678")));
}

#[test]
fn only_empty_rows_yields_empty_array() {
    let (_out, records) = convert_fixture("tests/fixtures/empty_rows_only.csv");
    assert!(records.is_empty());
}

#[test]
fn custom_delimiter_via_load_options() {
    let opts = LoadOptions {
        format: Some(InputFormat::Csv),
        delimiter: b';',
        ..Default::default()
    };
    let ds = ingest_from_path("tests/fixtures/semicolon.csv", &opts).unwrap();
    assert_eq!(ds.columns, vec!["Год", "Месяц", "Линия"]);
    assert_eq!(ds.rows[0][0], Value::Int64(2024));
}

#[test]
fn missing_input_is_load_error() {
    let out = tempfile::tempdir().unwrap();
    let err = convert_file("tests/fixtures/does_not_exist.csv", out.path(), &quiet_options())
        .unwrap_err();
    assert!(matches!(err, ConvertError::Load { .. }));
    assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
}

#[test]
fn load_error_chain_names_the_cause_once() {
    let out = tempfile::tempdir().unwrap();
    let err = convert_file("tests/fixtures/does_not_exist.csv", out.path(), &quiet_options())
        .unwrap_err();
    assert_eq!(err.to_string(), "failed to load tests/fixtures/does_not_exist.csv");

    let chain = error_chain(err);
    assert!(chain.starts_with("failed to load tests/fixtures/does_not_exist.csv: "));
    assert_eq!(chain.matches("os error").count(), 1, "{chain}");
}

#[test]
fn missing_output_dir_is_write_error() {
    let out = tempfile::tempdir().unwrap();
    let missing = out.path().join("not_created");
    let err = convert_file(FIXTURE, &missing, &quiet_options()).unwrap_err();
    assert!(matches!(err, ConvertError::Write { .. }));
    assert!(!Path::new(&missing).exists());
    assert_eq!(error_chain(err).matches("os error").count(), 1);
}

#[test]
fn unknown_extension_without_variant_is_load_error() {
    let out = tempfile::tempdir().unwrap();
    let input = out.path().join("manifest.txt");
    std::fs::copy(FIXTURE, &input).unwrap();

    let err = convert_file(&input, out.path(), &quiet_options()).unwrap_err();
    assert!(error_chain(err).contains("cannot infer format"));

    // An explicit variant also fixes the input format.
    let opts = ConvertOptions {
        variant: Some(Variant::Csv),
        ..quiet_options()
    };
    let summary = convert_file(&input, out.path(), &opts).unwrap();
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.output, out.path().join("manifest.txt.json"));
}
