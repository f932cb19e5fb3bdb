//! Row/record shaping: the converters between a [`DataSet`] and a document record.
//!
//! A document record is a JSON object mapping unique string keys to attribute objects.
//! [`dataset_to_record`] extracts one record entry per table row using a designated key
//! column; [`record_to_dataset`] is the inverse, rebuilding rows from record entries.

use std::collections::HashSet;

use serde_json::{Map, Value as JsonValue};

use crate::error::{ConvertError, ConvertResult};
use crate::normalize::normalize_value;
use crate::types::{DataSet, Value};

/// Column name used for bare scalar record values on the inbound side.
pub const SCALAR_VALUE_COLUMN: &str = "value";

/// Shape a dataset into a document record keyed by `key_column`.
///
/// Rules:
///
/// - `key_column` must exist in the dataset ([`ConvertError::KeyColumnMissing`]).
/// - Rows with a missing key cell are dropped and do not affect duplicate detection.
/// - Remaining key cells are coerced to strings; repeated strings fail the conversion with
///   [`ConvertError::DuplicateKeys`] naming each distinct duplicate once; nothing is
///   silently overwritten.
/// - Each surviving row contributes an attribute object built from every column except the
///   key column, with cells passed through [`normalize_value`]. The key's own values never
///   reappear inside the attribute object.
pub fn dataset_to_record(
    ds: &DataSet,
    key_column: &str,
) -> ConvertResult<Map<String, JsonValue>> {
    let key_idx = ds
        .column_index(key_column)
        .ok_or_else(|| ConvertError::KeyColumnMissing {
            column: key_column.to_string(),
        })?;

    let surviving: Vec<(&Vec<Value>, String)> = ds
        .rows
        .iter()
        .filter(|row| !row[key_idx].is_missing())
        .map(|row| (row, row[key_idx].to_display_string()))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for (_, key) in &surviving {
        if !seen.insert(key.as_str()) && !duplicates.iter().any(|d| d == key) {
            duplicates.push(key.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(ConvertError::DuplicateKeys {
            column: key_column.to_string(),
            values: duplicates,
        });
    }

    let mut record = Map::new();
    for (row, key) in surviving {
        let mut attributes = Map::new();
        for (idx, name) in ds.columns.iter().enumerate() {
            if idx == key_idx {
                continue;
            }
            attributes.insert(name.clone(), normalize_value(&row[idx]));
        }
        record.insert(key, JsonValue::Object(attributes));
    }
    Ok(record)
}

/// Shape a dataset into a document record with synthesized keys.
///
/// Keys are the 1-based row position as a string, in row order, and every column (including
/// any would-be key column) is retained as an attribute. This mode is never entered
/// automatically by the primary conversion flow; it is an explicit alternate contract for
/// callers that pre-decide not to use column-based keys.
pub fn dataset_to_record_with_generated_keys(ds: &DataSet) -> Map<String, JsonValue> {
    let mut record = Map::new();
    for (idx0, row) in ds.rows.iter().enumerate() {
        let mut attributes = Map::new();
        for (name, cell) in ds.columns.iter().zip(row.iter()) {
            attributes.insert(name.clone(), normalize_value(cell));
        }
        record.insert((idx0 + 1).to_string(), JsonValue::Object(attributes));
    }
    record
}

/// Rebuild a tabular dataset from a parsed document record.
///
/// The root must be a JSON object ([`ConvertError::InvalidDocumentRoot`]). Entries are
/// visited in the record's iteration order:
///
/// - an object value contributes one row with the entry key under `key_field` plus one
///   column per attribute name (an attribute literally named like `key_field` overwrites
///   the key cell);
/// - a bare scalar contributes one row with the key plus a single
///   [`SCALAR_VALUE_COLUMN`] cell.
///
/// The resulting column set is `key_field` followed by attribute names in first-seen
/// order; rows that lack an attribute get a missing value in that column. Nested arrays
/// and objects inside attributes degrade to their compact JSON text.
pub fn record_to_dataset(root: &JsonValue, key_field: &str) -> ConvertResult<DataSet> {
    let record = root.as_object().ok_or(ConvertError::InvalidDocumentRoot)?;

    let mut columns: Vec<String> = vec![key_field.to_string()];
    let mut raw_rows: Vec<Vec<(usize, Value)>> = Vec::with_capacity(record.len());

    for (key, value) in record {
        let mut cells: Vec<(usize, Value)> = vec![(0, Value::Utf8(key.clone()))];
        match value {
            JsonValue::Object(attributes) => {
                for (name, attr) in attributes {
                    let idx = column_position(&mut columns, name);
                    upsert_cell(&mut cells, idx, json_to_cell(attr));
                }
            }
            scalar => {
                let idx = column_position(&mut columns, SCALAR_VALUE_COLUMN);
                upsert_cell(&mut cells, idx, json_to_cell(scalar));
            }
        }
        raw_rows.push(cells);
    }

    let width = columns.len();
    let rows = raw_rows
        .into_iter()
        .map(|cells| {
            let mut row = vec![Value::Null; width];
            for (idx, cell) in cells {
                row[idx] = cell;
            }
            row
        })
        .collect();

    Ok(DataSet::new(columns, rows))
}

/// Index of `name` in the running column list, appending it on first sight.
fn column_position(columns: &mut Vec<String>, name: &str) -> usize {
    match columns.iter().position(|c| c == name) {
        Some(idx) => idx,
        None => {
            columns.push(name.to_string());
            columns.len() - 1
        }
    }
}

/// Set a cell in the sparse per-row buffer, replacing an earlier write to the same column.
fn upsert_cell(cells: &mut Vec<(usize, Value)>, idx: usize, value: Value) {
    match cells.iter_mut().find(|(i, _)| *i == idx) {
        Some(slot) => slot.1 = value,
        None => cells.push((idx, value)),
    }
}

fn json_to_cell(v: &JsonValue) -> Value {
    match v {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float64(f)
            } else {
                // u64 beyond i64 range.
                Value::Utf8(n.to_string())
            }
        }
        JsonValue::String(s) => Value::Utf8(s.clone()),
        // Nested structures have no cell representation; keep their JSON text.
        other => Value::Utf8(other.to_string()),
    }
}
