//! `sheetdoc` converts tabular spreadsheet data into a key-indexed JSON document shape
//! (one unique string key per row, mapped to an attribute object: the record layout of a
//! document-style key-value store) and back.
//!
//! The primary entrypoints are [`pipeline::excel_to_json`] and [`pipeline::json_to_excel`],
//! plus [`pipeline::detect_key_column_in_file`] for running only the key-column detector.
//!
//! ## What a conversion does
//!
//! **Spreadsheet -> document** ([`pipeline::excel_to_json`]):
//!
//! - reads one sheet (first row as header) into an untyped in-memory [`types::DataSet`]
//! - picks the key column automatically ([`detect::detect_key_column`]): conventional
//!   identifier names (`id`, `key`, `docid`, `uid`) first, then the first column with
//!   unique non-missing values
//! - drops rows with a missing key, fails on duplicate keys, and shapes every other column
//!   into per-row attribute objects via [`normalize::normalize_value`] (dates and durations
//!   become ISO-8601 strings, missing cells become `null`)
//! - writes the record as pretty-printed UTF-8 JSON, non-ASCII preserved literally
//!
//! **Document -> spreadsheet** ([`pipeline::json_to_excel`]): the inverse; each record
//! entry becomes one row keyed under the configured key field (default `"id"`), bare
//! scalar entries land in a generic `value` column, and the column set is the first-seen
//! union of attribute names.
//!
//! ## Quick example
//!
//! ```no_run
//! use sheetdoc::pipeline::{excel_to_json, ConvertOptions};
//!
//! # fn main() -> Result<(), sheetdoc::ConvertError> {
//! excel_to_json("people.xlsx", "people.json", &ConvertOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! In-memory conversion without the file adapters:
//!
//! ```
//! use sheetdoc::record::dataset_to_record;
//! use sheetdoc::types::{DataSet, Value};
//!
//! let ds = DataSet::new(
//!     vec!["id".to_string(), "name".to_string()],
//!     vec![
//!         vec![Value::Int64(1), Value::Utf8("Ann".to_string())],
//!         vec![Value::Int64(2), Value::Utf8("Bo".to_string())],
//!     ],
//! );
//! let record = dataset_to_record(&ds, "id").unwrap();
//! assert_eq!(record["1"]["name"], "Ann");
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`]: conversion entry points, [`pipeline::ConvertOptions`], observability
//! - [`detect`]: key-column detection
//! - [`record`]: row <-> record shaping
//! - [`normalize`]: cell value normalization for document output
//! - [`io`]: spreadsheet and JSON file adapters
//! - [`types`]: the in-memory dataset and cell value types
//! - [`error`]: error types used across conversion
//!
//! Everything runs single-threaded and synchronously; datasets and records are built fresh
//! per call and fully materialized in memory.

pub mod detect;
pub mod error;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod types;

pub use error::{ConvertError, ConvertResult};
