//! Raw export loading, dispatched on file extension
//!
//! Yearly exports come either as workbooks (`2024y.xlsx`) or as CSV saved
//! from them (`2024y.csv`). Both end up as the same `RawTable`.

use std::path::Path;

use bora_domain::service::RawTable;
use thiserror::Error;

use crate::source_csv::load_csv_table;
use crate::source_xlsx::load_xlsx_table;

#[derive(Error, Debug)]
pub enum SourceLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: String, message: String },

    #[error("{0} has no header row")]
    MissingHeader(String),
}

impl From<SourceLoadError> for bora_types::Error {
    fn from(err: SourceLoadError) -> Self {
        match err {
            SourceLoadError::Io { source, .. } => bora_types::Error::Io(source),
            SourceLoadError::Workbook { .. } => bora_types::Error::Excel(err.to_string()),
            other => bora_types::Error::Csv(other.to_string()),
        }
    }
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls"];

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| WORKBOOK_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// File name used as the table name in logs and reports
pub(crate) fn table_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Load one raw export, workbook or CSV
pub fn load_source_table<P: AsRef<Path>>(path: P) -> Result<RawTable, SourceLoadError> {
    let path = path.as_ref();
    if is_workbook(path) {
        load_xlsx_table(path)
    } else {
        load_csv_table(path)
    }
}
