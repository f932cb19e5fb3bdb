use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sheetdoc::io::excel::read_excel;
use sheetdoc::pipeline::{json_to_excel, ConvertOptions};
use sheetdoc::types::Value;
use sheetdoc::ConvertError;

fn tmp_file(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sheetdoc-{name}-{nanos}.{ext}"))
}

fn s(v: &str) -> Value {
    Value::Utf8(v.to_string())
}

#[test]
fn rebuilds_rows_in_record_order() {
    let json = tmp_file("j2x-happy", "json");
    let excel = tmp_file("j2x-happy", "xlsx");
    std::fs::write(&json, r#"{"1": {"name": "Ann"}, "2": {"name": "Bo"}}"#).unwrap();

    json_to_excel(&json, &excel, &ConvertOptions::default()).unwrap();

    let ds = read_excel(&excel, 0, 0).unwrap();
    assert_eq!(ds.columns, vec!["id", "name"]);
    assert_eq!(
        ds.rows,
        vec![vec![s("1"), s("Ann")], vec![s("2"), s("Bo")]]
    );

    let _ = std::fs::remove_file(&json);
    let _ = std::fs::remove_file(&excel);
}

#[test]
fn bare_scalars_get_a_generic_value_column() {
    let json = tmp_file("j2x-scalar", "json");
    let excel = tmp_file("j2x-scalar", "xlsx");
    std::fs::write(&json, r#"{"1": 42}"#).unwrap();

    json_to_excel(&json, &excel, &ConvertOptions::default()).unwrap();

    let ds = read_excel(&excel, 0, 0).unwrap();
    assert_eq!(ds.columns, vec!["id", "value"]);
    // Spreadsheet numbers come back as floats.
    assert_eq!(ds.rows, vec![vec![s("1"), Value::Float64(42.0)]]);

    let _ = std::fs::remove_file(&json);
    let _ = std::fs::remove_file(&excel);
}

#[test]
fn column_set_is_the_first_seen_union_of_attributes() {
    let json = tmp_file("j2x-union", "json");
    let excel = tmp_file("j2x-union", "xlsx");
    std::fs::write(
        &json,
        r#"{"1": {"name": "Ann", "age": 30}, "2": {"city": "Busan", "name": "Bo"}}"#,
    )
    .unwrap();

    json_to_excel(&json, &excel, &ConvertOptions::default()).unwrap();

    let ds = read_excel(&excel, 0, 0).unwrap();
    assert_eq!(ds.columns, vec!["id", "name", "age", "city"]);
    assert_eq!(
        ds.rows,
        vec![
            vec![s("1"), s("Ann"), Value::Float64(30.0), Value::Null],
            vec![s("2"), s("Bo"), Value::Null, s("Busan")],
        ]
    );

    let _ = std::fs::remove_file(&json);
    let _ = std::fs::remove_file(&excel);
}

#[test]
fn list_root_is_rejected() {
    let json = tmp_file("j2x-list", "json");
    let excel = tmp_file("j2x-list", "xlsx");
    std::fs::write(&json, r#"[{"name": "Ann"}]"#).unwrap();

    let err = json_to_excel(&json, &excel, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidDocumentRoot));
    assert!(!excel.exists());

    let _ = std::fs::remove_file(&json);
}

#[test]
fn malformed_json_is_a_json_error() {
    let json = tmp_file("j2x-bad", "json");
    let excel = tmp_file("j2x-bad", "xlsx");
    std::fs::write(&json, "{not json").unwrap();

    let err = json_to_excel(&json, &excel, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Json(_)));
    assert!(!excel.exists());

    let _ = std::fs::remove_file(&json);
}

#[test]
fn custom_key_field_is_honored() {
    let json = tmp_file("j2x-keyfield", "json");
    let excel = tmp_file("j2x-keyfield", "xlsx");
    std::fs::write(&json, r#"{"u1": {"name": "Ann"}}"#).unwrap();

    let options = ConvertOptions {
        key_field: "docid".to_string(),
        ..Default::default()
    };
    json_to_excel(&json, &excel, &options).unwrap();

    let ds = read_excel(&excel, 0, 0).unwrap();
    assert_eq!(ds.columns, vec!["docid", "name"]);
    assert_eq!(ds.rows, vec![vec![s("u1"), s("Ann")]]);

    let _ = std::fs::remove_file(&json);
    let _ = std::fs::remove_file(&excel);
}
