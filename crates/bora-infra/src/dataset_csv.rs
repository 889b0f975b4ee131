//! Consolidated dataset file (최종정밀단가표) in CSV form

use std::path::Path;

use bora_domain::model::{ShipmentRecord, VehicleCategory};
use bora_domain::service::ingest::{coerce_fare, columns, format_compact_date, parse_receipt_date};
use bora_types::{Error, Result};
use tracing::debug;

use crate::source::load_source_table;

/// Spreadsheet software needs the BOM to open UTF-8 Korean text correctly
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn field(record: &ShipmentRecord, column: &str) -> String {
    match column {
        columns::RECEIPT_DATE => format_compact_date(record.date),
        columns::CUSTOMER => record.customer_name.clone(),
        columns::DESTINATION => record.destination.clone(),
        columns::CATEGORY => record.vehicle_category.to_string(),
        columns::FARE => record.fare.to_string(),
        _ => String::new(),
    }
}

/// Serialize records with the given column subset
pub fn render_dataset(records: &[ShipmentRecord], columns: &[&str]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());
    writer
        .write_record(columns)
        .map_err(|e| Error::Csv(e.to_string()))?;
    for record in records {
        writer
            .write_record(columns.iter().map(|c| field(record, c)))
            .map_err(|e| Error::Csv(e.to_string()))?;
    }
    writer.into_inner().map_err(|e| Error::Csv(e.to_string()))
}

/// Overwrite the dataset file
pub fn write_dataset(path: &Path, records: &[ShipmentRecord], columns: &[&str]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_dataset(records, columns)?)?;
    debug!(path = %path.display(), rows = records.len(), "dataset written");
    Ok(())
}

fn cell(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
}

/// Read the dataset back, from CSV or from the `--xlsx` workbook. Rows with
/// unusable dates are skipped and fares are coerced again, so hand-edited
/// files still load.
pub fn read_dataset(path: &Path) -> Result<Vec<ShipmentRecord>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let name = path.display().to_string();
    let table = load_source_table(path)?;

    let category_idx = table
        .column_index(columns::CATEGORY)
        .ok_or_else(|| Error::Dataset(format!("{} has no {} column", name, columns::CATEGORY)))?;
    let date_idx = table.column_index(columns::RECEIPT_DATE);
    let customer_idx = table.column_index(columns::CUSTOMER);
    let dest_idx = table.column_index(columns::DESTINATION);
    let fare_idx = table.column_index(columns::FARE);

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let Some(date) = parse_receipt_date(&cell(row, date_idx)) else {
            continue;
        };
        records.push(ShipmentRecord {
            date,
            customer_name: cell(row, customer_idx),
            destination: cell(row, dest_idx),
            vehicle_category: VehicleCategory::new(cell(row, Some(category_idx))),
            fare: coerce_fare(&cell(row, fare_idx)),
        });
    }
    Ok(records)
}
