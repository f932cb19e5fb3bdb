//! Spreadsheet reading and writing.
//!
//! Reading goes through `calamine` and keeps cells untyped beyond what the file format
//! itself encodes; writing goes through `rust_xlsxwriter`, emitting a single sheet with a
//! header row and no index column.

use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_xlsxwriter::Workbook;

use crate::error::ConvertResult;
use crate::types::{DataSet, Value};

/// Load one sheet of a spreadsheet file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - `sheet_index` selects the sheet (0-based); `header_row` is the 0-based row within the
///   sheet's used range whose cells become the column names.
/// - Rows after the header become data rows. Ragged rows are padded with missing values to
///   the header width; cells beyond it are dropped.
/// - Cells are not coerced: numbers, booleans, and strings arrive as-is, date-formatted
///   cells become date/time or duration values, and anything foreign (formula errors,
///   unparseable cached ISO text) degrades to its string form.
/// - A sheet with no row at `header_row` produces an empty dataset.
pub fn read_excel(
    path: impl AsRef<Path>,
    sheet_index: usize,
    header_row: usize,
) -> ConvertResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = workbook
        .sheet_names()
        .get(sheet_index)
        .ok_or(calamine::Error::Msg("sheet index out of range"))?
        .clone();
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows_iter = range.rows().skip(header_row);
    let columns: Vec<String> = match rows_iter.next() {
        Some(header) => header
            .iter()
            .map(|cell| data_to_value(cell).to_display_string())
            .collect(),
        None => return Ok(DataSet::default()),
    };

    let width = columns.len();
    let mut rows: Vec<Vec<Value>> = Vec::new();
    for row in rows_iter {
        let mut out_row: Vec<Value> = Vec::with_capacity(width);
        for col in 0..width {
            out_row.push(row.get(col).map_or(Value::Null, data_to_value));
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(columns, rows))
}

fn data_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                match dt.as_duration() {
                    Some(td) => Value::Duration(td),
                    None => Value::Float64(dt.as_f64()),
                }
            } else {
                match dt.as_datetime() {
                    Some(naive) => Value::DateTime(naive),
                    None => Value::Float64(dt.as_f64()),
                }
            }
        }
        Data::DateTimeIso(s) => parse_iso_cell(s),
        // Already an ISO-8601 duration string; keep the text.
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(e) => Value::Utf8(e.to_string()),
    }
}

/// Best-effort parse of a cached ISO-8601 cell into a temporal value.
///
/// Falls back to the raw text when none of the date, time, or date-time shapes match.
fn parse_iso_cell(s: &str) -> Value {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Value::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Value::Date(d);
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S%.f") {
        return Value::Time(t);
    }
    Value::Utf8(s.to_string())
}

/// Serialize a [`DataSet`] to a spreadsheet file: single sheet named `sheet_name`, header
/// row from the column names, no index column.
///
/// Parent directories are created as needed; the file is only written once the whole
/// workbook has been assembled in memory.
pub fn write_excel(
    ds: &DataSet,
    path: impl AsRef<Path>,
    sheet_name: &str,
) -> ConvertResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in ds.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    for (row_idx, row) in ds.rows.iter().enumerate() {
        let r = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_idx as u16;
            match cell {
                Value::Null => {}
                Value::Int64(i) => {
                    worksheet.write_number(r, c, *i as f64)?;
                }
                Value::Float64(f) => {
                    if f.is_finite() {
                        worksheet.write_number(r, c, *f)?;
                    } else if !f.is_nan() {
                        worksheet.write_string(r, c, cell.to_display_string())?;
                    }
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
                Value::Utf8(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                // Temporal values are written in their ISO string form.
                other => {
                    worksheet.write_string(r, c, other.to_display_string())?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
