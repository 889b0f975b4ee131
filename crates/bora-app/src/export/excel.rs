//! Excel export functionality

use crate::app::receipt::{Receipt, RowKind};
use bora_domain::model::ShipmentRecord;
use bora_domain::service::ingest::{columns, format_compact_date};
use bora_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the consolidated dataset as a workbook with the same columns as
/// the CSV file
pub fn export_dataset_to_excel(
    records: &[ShipmentRecord],
    column_names: &[&str],
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_dataset_sheet(sheet, records, column_names)?;
    workbook.save(output_path).map_err(xlsx_err)?;
    Ok(())
}

fn write_dataset_sheet(
    sheet: &mut Worksheet,
    records: &[ShipmentRecord],
    column_names: &[&str],
) -> Result<()> {
    let header_format = Format::new().set_bold();

    for (col, header) in column_names.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col, name) in column_names.iter().enumerate() {
            let col = col as u16;
            let written = match *name {
                columns::RECEIPT_DATE => {
                    sheet.write_string(row, col, format_compact_date(record.date))
                }
                columns::CUSTOMER => sheet.write_string(row, col, &record.customer_name),
                columns::DESTINATION => sheet.write_string(row, col, &record.destination),
                columns::CATEGORY => sheet.write_string(row, col, record.vehicle_category.as_str()),
                columns::FARE => sheet.write_number(row, col, record.fare as f64),
                _ => continue,
            };
            written.map_err(xlsx_err)?;
        }
    }

    // Approximate widths
    for (col, name) in column_names.iter().enumerate() {
        let width = if *name == columns::DESTINATION { 50 } else { 14 };
        sheet.set_column_width(col as u16, width).map_err(xlsx_err)?;
    }

    Ok(())
}

/// Write a receipt as a two-column label/value workbook
pub fn write_receipt_workbook(receipt: &Receipt, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("영수증").map_err(xlsx_err)?;

    let title_format = Format::new().set_bold().set_font_size(16);
    let section_format = Format::new().set_bold();

    for (idx, line) in receipt.rows.iter().enumerate() {
        let row = idx as u32;
        match line.kind {
            RowKind::Title => {
                sheet
                    .write_string_with_format(row, 0, &line.label, &title_format)
                    .map_err(xlsx_err)?;
            }
            RowKind::Section => {
                sheet
                    .write_string_with_format(row, 0, &line.label, &section_format)
                    .map_err(xlsx_err)?;
            }
            RowKind::Plain => {
                if !line.label.is_empty() {
                    sheet.write_string(row, 0, &line.label).map_err(xlsx_err)?;
                }
                if !line.value.is_empty() {
                    sheet.write_string(row, 1, &line.value).map_err(xlsx_err)?;
                }
            }
        }
    }

    sheet.set_column_width(0, 30).map_err(xlsx_err)?;
    sheet.set_column_width(1, 40).map_err(xlsx_err)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    Ok(())
}
