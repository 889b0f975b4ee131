//! Workbook exports read with calamine
//!
//! Only the first sheet is read. Its first non-blank row is the header.

use std::path::Path;

use bora_domain::service::RawTable;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::source::{table_name, SourceLoadError};

/// Render one cell the way the CSV export would have written it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => serial_date_text(dt.as_f64()).unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Excel serial day number (1900 system) as `%Y-%m-%d`
fn serial_date_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::try_days(serial.trunc() as i64)?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Load the first sheet of a workbook export
pub fn load_xlsx_table<P: AsRef<Path>>(path: P) -> Result<RawTable, SourceLoadError> {
    let path = path.as_ref();
    let name = table_name(path);
    let workbook_err = |e: calamine::Error| SourceLoadError::Workbook {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceLoadError::MissingHeader(name.clone()))?
        .map_err(workbook_err)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()));

    let headers = rows
        .next()
        .ok_or_else(|| SourceLoadError::MissingHeader(name.clone()))?;
    let rows: Vec<_> = rows.collect();
    debug!(table = %name, columns = headers.len(), rows = rows.len(), "workbook loaded");

    Ok(RawTable {
        name,
        headers,
        rows,
    })
}
