//! Conversion entry points and configuration.
//!
//! The two pipelines share nothing but the value-normalization step and run synchronously
//! to completion:
//!
//! - [`excel_to_json`]: spreadsheet -> key detection -> record shaping -> JSON document
//! - [`json_to_excel`]: JSON document -> row reconstruction -> spreadsheet
//!
//! [`detect_key_column_in_file`] runs only the detection stage. Behavior is controlled by
//! a [`ConvertOptions`] value; when an observer is configured, each entry point reports
//! success/failure/alerts to it.

pub mod observability;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::detect::detect_key_column;
use crate::error::{ConvertError, ConvertResult};
use crate::io;
use crate::record::dataset_to_record;

pub use observability::{
    CompositeObserver, ConversionContext, ConversionObserver, ConversionSeverity,
    ConversionStats, FileObserver, Operation, StdErrObserver,
};

/// Options controlling conversion behavior.
///
/// Use [`Default`] for common cases: first sheet, first row as header, output sheet
/// `"Sheet1"`, key field `"id"`, no observer.
#[derive(Clone)]
pub struct ConvertOptions {
    /// Which sheet to read (0-based).
    pub sheet_index: usize,
    /// Which row of the sheet holds the column names (0-based).
    pub header_row: usize,
    /// Sheet name used when writing a spreadsheet.
    pub output_sheet_name: String,
    /// Column name that carries record keys in tabular form.
    pub key_field: String,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ConversionSeverity,
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("sheet_index", &self.sheet_index)
            .field("header_row", &self.header_row)
            .field("output_sheet_name", &self.output_sheet_name)
            .field("key_field", &self.key_field)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sheet_index: 0,
            header_row: 0,
            output_sheet_name: "Sheet1".to_string(),
            key_field: "id".to_string(),
            observer: None,
            alert_at_or_above: ConversionSeverity::Critical,
        }
    }
}

/// Run the tabular -> document pipeline.
///
/// Reads the configured sheet of `excel_path`, detects the key column
/// ([`ConvertError::NoKeyColumn`] if none qualifies), shapes the rows into a record, and
/// writes it as pretty-printed UTF-8 JSON to `json_path`. The output file is only created
/// after the complete record exists in memory.
pub fn excel_to_json(
    excel_path: impl AsRef<Path>,
    json_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> ConvertResult<()> {
    let excel_path = excel_path.as_ref();
    let json_path = json_path.as_ref();
    let ctx = ConversionContext {
        operation: Operation::ExcelToJson,
        input: excel_path.to_path_buf(),
        output: Some(json_path.to_path_buf()),
    };

    let result: ConvertResult<ConversionStats> = (|| {
        let ds = io::excel::read_excel(excel_path, options.sheet_index, options.header_row)?;
        let key_column = detect_key_column(&ds).ok_or(ConvertError::NoKeyColumn)?;
        let record = dataset_to_record(&ds, key_column)?;
        let entries = record.len();
        io::json::write_json(json_path, &serde_json::Value::Object(record))?;
        Ok(ConversionStats { rows: entries })
    })();

    report(options, &ctx, result.as_ref().map(|stats| *stats));
    result.map(|_| ())
}

/// Run the document -> tabular pipeline.
///
/// Reads `json_path` ([`ConvertError::InvalidDocumentRoot`] unless the top level is an
/// object), reconstructs rows in record iteration order, and writes a single-sheet
/// spreadsheet to `excel_path`.
pub fn json_to_excel(
    json_path: impl AsRef<Path>,
    excel_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> ConvertResult<()> {
    let json_path = json_path.as_ref();
    let excel_path = excel_path.as_ref();
    let ctx = ConversionContext {
        operation: Operation::JsonToExcel,
        input: json_path.to_path_buf(),
        output: Some(excel_path.to_path_buf()),
    };

    let result: ConvertResult<ConversionStats> = (|| {
        let root = io::json::read_json(json_path)?;
        let ds = crate::record::record_to_dataset(&root, &options.key_field)?;
        let rows = ds.row_count();
        io::excel::write_excel(&ds, excel_path, &options.output_sheet_name)?;
        Ok(ConversionStats { rows })
    })();

    report(options, &ctx, result.as_ref().map(|stats| *stats));
    result.map(|_| ())
}

/// Run only the key-column detection stage against a spreadsheet file.
///
/// Returns the detected column name, or `None` when no column qualifies; that outcome is
/// a value, not an error. Read failures still surface as errors.
pub fn detect_key_column_in_file(
    excel_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> ConvertResult<Option<String>> {
    let excel_path = excel_path.as_ref();
    let ctx = ConversionContext {
        operation: Operation::DetectKey,
        input: excel_path.to_path_buf(),
        output: None,
    };

    let result: ConvertResult<(ConversionStats, Option<String>)> = (|| {
        let ds = io::excel::read_excel(excel_path, options.sheet_index, options.header_row)?;
        let detected = detect_key_column(&ds).map(str::to_owned);
        Ok((ConversionStats { rows: ds.row_count() }, detected))
    })();

    report(options, &ctx, result.as_ref().map(|(stats, _)| *stats));
    result.map(|(_, detected)| detected)
}

fn report(
    options: &ConvertOptions,
    ctx: &ConversionContext,
    result: Result<ConversionStats, &ConvertError>,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(stats) => obs.on_success(ctx, stats),
        Err(e) => {
            let severity = severity_for_error(e);
            obs.on_failure(ctx, severity, e);
            if severity >= options.alert_at_or_above {
                obs.on_alert(ctx, severity, e);
            }
        }
    }
}

fn severity_for_error(e: &ConvertError) -> ConversionSeverity {
    match e {
        ConvertError::Io(_) => ConversionSeverity::Critical,
        ConvertError::Excel(calamine::Error::Io(_)) => ConversionSeverity::Critical,
        _ => ConversionSeverity::Error,
    }
}
