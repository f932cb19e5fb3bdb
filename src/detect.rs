//! Key column detection.
//!
//! Given a [`DataSet`], pick the column whose values should become the unique record keys,
//! or report that none qualifies. Detection is deterministic: a fixed preference list of
//! conventional identifier names first, then a left-to-right scan.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::{DataSet, Value};

/// Column names (after trim + lowercase) tried first, in order.
pub const PREFERRED_KEY_NAMES: [&str; 4] = ["id", "key", "docid", "uid"];

/// Choose the column to use as the unique record key, or `None` if no column qualifies.
///
/// Rules:
///
/// - An empty dataset (zero rows or zero columns) has no key column.
/// - Preferred names are matched against trimmed, lowercased column names; when several
///   columns normalize to the same name, the rightmost one is the match.
/// - A preferred column is selected only if its non-missing values are duplicate-free; a
///   present-but-duplicated preferred name is skipped in favor of the next preferred name.
/// - Otherwise the first column (left to right) with at least one non-missing value and no
///   duplicates is selected.
///
/// "No key column" is an ordinary `None`, never an error; callers decide whether that is
/// fatal for their operation.
pub fn detect_key_column(ds: &DataSet) -> Option<&str> {
    if ds.rows.is_empty() || ds.columns.is_empty() {
        return None;
    }

    let mut normalized: HashMap<String, usize> = HashMap::new();
    for (idx, name) in ds.columns.iter().enumerate() {
        normalized.insert(name.trim().to_lowercase(), idx);
    }

    for preferred in PREFERRED_KEY_NAMES {
        if let Some(&idx) = normalized.get(preferred) {
            if !has_duplicates(ds.column(idx)) {
                return Some(&ds.columns[idx]);
            }
        }
    }

    for (idx, name) in ds.columns.iter().enumerate() {
        let present = ds.column(idx).filter(|v| !v.is_missing()).count();
        if present > 0 && !has_duplicates(ds.column(idx)) {
            return Some(name);
        }
    }

    None
}

/// Returns `true` if the non-missing values contain at least one duplicate.
fn has_duplicates<'a>(values: impl Iterator<Item = &'a Value>) -> bool {
    let mut seen = HashSet::new();
    for value in values {
        if let Some(key) = raw_key(value) {
            if !seen.insert(key) {
                return true;
            }
        }
    }
    false
}

/// Hashable identity of a raw (pre-string-coercion) cell value.
///
/// Integral floats collapse onto their integer identity so `1` and `1.0` count as the
/// same key; other floats hash by bit pattern. Missing markers have no identity.
#[derive(PartialEq, Eq, Hash)]
enum RawKey<'a> {
    Int(i64),
    FloatBits(u64),
    Bool(bool),
    Str(&'a str),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Duration(i64, i32),
}

fn raw_key(value: &Value) -> Option<RawKey<'_>> {
    match value {
        Value::Null => None,
        Value::Int64(i) => Some(RawKey::Int(*i)),
        Value::Float64(f) => {
            if f.is_nan() {
                None
            } else if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Some(RawKey::Int(*f as i64))
            } else {
                Some(RawKey::FloatBits(f.to_bits()))
            }
        }
        Value::Bool(b) => Some(RawKey::Bool(*b)),
        Value::Utf8(s) => Some(RawKey::Str(s)),
        Value::DateTime(dt) => Some(RawKey::DateTime(*dt)),
        Value::Date(d) => Some(RawKey::Date(*d)),
        Value::Time(t) => Some(RawKey::Time(*t)),
        Value::Duration(td) => Some(RawKey::Duration(td.num_seconds(), td.subsec_nanos())),
    }
}
