use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error type returned by conversion functions.
///
/// Every variant is terminal for the current operation; nothing is retried or auto-corrected.
/// Underlying file and format failures are preserved as sources rather than swallowed.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet could not be opened or read.
    #[error("spreadsheet error: {0}")]
    Excel(#[from] calamine::Error),

    /// Spreadsheet could not be written.
    #[error("spreadsheet write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Document could not be parsed or serialized as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// No column in the dataset qualifies as a unique record key.
    #[error("no key column found; add a column with unique values (e.g. 'id') and retry")]
    NoKeyColumn,

    /// A caller-specified key column name does not exist in the dataset.
    #[error("key column '{column}' does not exist in the dataset")]
    KeyColumnMissing {
        /// The requested column name.
        column: String,
    },

    /// The chosen key column has repeated values among non-missing rows after string
    /// coercion. Each distinct duplicate is listed once.
    #[error("key column '{column}' has duplicate values: {values:?}")]
    DuplicateKeys {
        /// The offending column name.
        column: String,
        /// Distinct duplicated key values, in order of first duplication.
        values: Vec<String>,
    },

    /// The document input's top-level JSON value is not an object.
    #[error("document root must be a json object mapping keys to attribute objects")]
    InvalidDocumentRoot,
}
