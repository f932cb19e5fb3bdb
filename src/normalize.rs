//! Cell value normalization for document output.
//!
//! [`normalize_value`] maps one cell from its tabular representation to a JSON-safe value.
//! It is a total, pure function: every [`Value`] variant has a defined mapping, and anything
//! without a natural JSON encoding degrades to its string form instead of failing.

use chrono::TimeDelta;

use crate::types::Value;

/// Map a single cell value to its JSON representation.
///
/// Rules:
///
/// - Missing markers ([`Value::Null`], `NaN` floats) become JSON `null`.
/// - Date, time, and combined date-time values become canonical ISO-8601 strings.
/// - Durations become ISO-8601 duration strings (`P1DT2H3M4S`).
/// - Numbers, booleans, and strings pass through unchanged; non-finite floats (which JSON
///   cannot represent) fall back to their display string.
pub fn normalize_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Int64(i) => serde_json::Value::Number((*i).into()),
        Value::Float64(f) => {
            if f.is_nan() {
                return serde_json::Value::Null;
            }
            match serde_json::Number::from_f64(*f) {
                Some(n) => serde_json::Value::Number(n),
                // +/- infinity has no JSON number form.
                None => serde_json::Value::String(value.to_display_string()),
            }
        }
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Utf8(s) => serde_json::Value::String(s.clone()),
        Value::DateTime(_) | Value::Date(_) | Value::Time(_) => {
            serde_json::Value::String(value.to_display_string())
        }
        Value::Duration(td) => serde_json::Value::String(format_iso_duration(*td)),
    }
}

/// Format an elapsed time as an ISO-8601 duration string.
///
/// Always emits the full `P{days}DT{hours}H{minutes}M{seconds}S` shape; sub-second
/// precision is appended as a nanosecond fraction when present, and negative durations
/// carry a leading `-`.
pub fn format_iso_duration(td: TimeDelta) -> String {
    let sign = if td < TimeDelta::zero() { "-" } else { "" };
    let td = td.abs();

    let total_secs = td.num_seconds();
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let secs = total_secs % 60;
    let nanos = td.subsec_nanos();

    if nanos == 0 {
        format!("{sign}P{days}DT{hours}H{minutes}M{secs}S")
    } else {
        format!("{sign}P{days}DT{hours}H{minutes}M{secs}.{nanos:09}S")
    }
}
