use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn sheetdoc() -> Command {
    Command::cargo_bin("sheetdoc").unwrap()
}

fn write_people_xlsx(path: &std::path::Path) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "Ann").unwrap();
    ws.write_number(2, 0, 2).unwrap();
    ws.write_string(2, 1, "Bo").unwrap();
    wb.save(path).unwrap();
}

#[test]
fn x2j_writes_the_document_and_reports_the_path() {
    let dir = tempdir().unwrap();
    let excel = dir.path().join("people.xlsx");
    let json = dir.path().join("out").join("people.json");
    write_people_xlsx(&excel);

    sheetdoc()
        .arg("x2j")
        .arg(&excel)
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(doc["1"]["name"], "Ann");
}

#[test]
fn j2x_then_detect_round_trips_through_the_cli() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("people.json");
    let excel = dir.path().join("people.xlsx");
    std::fs::write(&json, r#"{"1": {"name": "Ann"}, "2": {"name": "Bo"}}"#).unwrap();

    sheetdoc().arg("j2x").arg(&json).arg(&excel).assert().success();

    sheetdoc()
        .arg("detect")
        .arg(&excel)
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected key column: id"));
}

#[test]
fn detect_exits_zero_when_nothing_qualifies() {
    let dir = tempdir().unwrap();
    let excel = dir.path().join("dups.xlsx");

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "a").unwrap();
    ws.write_string(1, 0, "x").unwrap();
    ws.write_string(2, 0, "x").unwrap();
    wb.save(&excel).unwrap();

    sheetdoc()
        .arg("detect")
        .arg(&excel)
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn detect_fails_when_the_file_cannot_be_read() {
    sheetdoc()
        .arg("detect")
        .arg("missing.xlsx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn x2j_exits_non_zero_on_duplicate_keys() {
    let dir = tempdir().unwrap();
    let excel = dir.path().join("dup.xlsx");
    let json = dir.path().join("dup.json");

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "Ann").unwrap();
    ws.write_string(2, 0, "1").unwrap();
    ws.write_string(2, 1, "Ann").unwrap();
    wb.save(&excel).unwrap();

    sheetdoc()
        .arg("x2j")
        .arg(&excel)
        .arg(&json)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate values"));
    assert!(!json.exists());
}

#[test]
fn j2x_exits_non_zero_on_a_list_root() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("list.json");
    let excel = dir.path().join("list.xlsx");
    std::fs::write(&json, r#"[1, 2, 3]"#).unwrap();

    sheetdoc()
        .arg("j2x")
        .arg(&json)
        .arg(&excel)
        .assert()
        .failure()
        .stderr(predicate::str::contains("document root must be a json object"));
}

#[test]
fn no_arguments_prints_usage() {
    sheetdoc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
