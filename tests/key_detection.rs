use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::Workbook;
use sheetdoc::pipeline::{detect_key_column_in_file, ConvertOptions};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sheetdoc-{name}-{nanos}.xlsx"))
}

fn write_sheet(path: &PathBuf, header: &[&str], rows: &[&[&str]]) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (c, name) in header.iter().enumerate() {
        ws.write_string(0, c as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                ws.write_string((r + 1) as u32, c as u16, *cell).unwrap();
            }
        }
    }
    wb.save(path).unwrap();
}

#[test]
fn detects_preferred_id_column() {
    let path = tmp_file("detect-id");
    write_sheet(&path, &["name", "id"], &[&["Ann", "1"], &["Bo", "2"]]);

    let detected = detect_key_column_in_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(detected.as_deref(), Some("id"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn preferred_name_matching_ignores_case_and_padding() {
    let path = tmp_file("detect-case");
    write_sheet(&path, &["name", " DocID "], &[&["Ann", "a"], &["Bo", "b"]]);

    let detected = detect_key_column_in_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(detected.as_deref(), Some(" DocID "));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn duplicated_preferred_column_falls_back_to_scan() {
    let path = tmp_file("detect-fallback");
    write_sheet(
        &path,
        &["id", "name"],
        &[&["1", "Ann"], &["1", "Bo"]],
    );

    // "id" is disqualified by duplicates; "name" is the first unique column.
    let detected = detect_key_column_in_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(detected.as_deref(), Some("name"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn reports_none_when_no_column_qualifies() {
    let path = tmp_file("detect-none");
    write_sheet(
        &path,
        &["a", "b"],
        &[&["x", "y"], &["x", "y"]],
    );

    let detected = detect_key_column_in_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(detected, None);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_sheet_has_no_key_column() {
    let path = tmp_file("detect-empty");
    write_sheet(&path, &["id"], &[]);

    let detected = detect_key_column_in_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(detected, None);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_error_not_a_none() {
    let err =
        detect_key_column_in_file("does-not-exist.xlsx", &ConvertOptions::default()).unwrap_err();
    assert!(err.to_string().contains("spreadsheet error"));
}
