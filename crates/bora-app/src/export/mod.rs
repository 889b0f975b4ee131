//! Workbook export

mod excel;

pub use excel::{export_dataset_to_excel, write_receipt_workbook};
