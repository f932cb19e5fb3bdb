//! Core data model types for conversion.
//!
//! This crate moves data between an in-memory [`DataSet`] (ordered named columns, ordered rows)
//! and a key-indexed JSON document record (unique string key -> attribute object).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// A single untyped cell value in a [`DataSet`].
///
/// Cells carry whatever the spreadsheet format itself encodes; no coercion happens at read
/// time. Foreign cell contents (formula errors, unparseable cached ISO strings) are carried
/// as [`Value::Utf8`] so downstream stages never have to fail on them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty cell. Distinct from an empty string or zero.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float. `NaN` is treated as a missing-value marker.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Combined date and time.
    DateTime(NaiveDateTime),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Time of day without a date component.
    Time(NaiveTime),
    /// Elapsed time (spreadsheet duration cell).
    Duration(TimeDelta),
}

impl Value {
    /// Returns `true` for the missing-value markers: [`Value::Null`] and `NaN` floats.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(f) => f.is_nan(),
            _ => false,
        }
    }

    /// The value's plain string form, used for key coercion and as the degraded
    /// representation wherever a richer encoding is not defined.
    ///
    /// Integral floats print without a fractional part (`1.0` -> `"1"`), matching how
    /// spreadsheet identifiers are usually meant.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int64(i) => i.to_string(),
            Value::Float64(f) => {
                if f.fract() == 0.0 && f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64
                {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Bool(b) => b.to_string(),
            Value::Utf8(s) => s.clone(),
            Value::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Time(t) => t.format("%H:%M:%S%.f").to_string(),
            Value::Duration(td) => crate::normalize::format_iso_duration(*td),
        }
    }
}

/// In-memory tabular dataset.
///
/// Column names are unique, case-sensitive strings in left-to-right order. Rows are stored
/// row-major as `Vec<Vec<Value>>`, each exactly `columns.len()` wide. A dataset is built
/// fresh per conversion call and discarded after the corresponding write completes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from column names and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row's length differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        for (idx, row) in rows.iter().enumerate() {
            assert!(
                row.len() == columns.len(),
                "row {} has {} cells but the dataset has {} columns",
                idx,
                row.len(),
                columns.len()
            );
        }
        Self { columns, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by exact name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx])
    }
}
