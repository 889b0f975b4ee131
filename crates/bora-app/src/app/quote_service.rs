//! Quote Service - price a shipment and issue its receipt

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use bora_domain::model::{QuoteOptions, QuoteResult, ShipmentRecord, VehicleCategory};
use bora_domain::service::price;
use bora_types::Result;

use super::receipt::{receipt_file_name, Receipt};
use crate::config::IssuerInfo;
use crate::export::write_receipt_workbook;

/// Everything needed to price one shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRequest {
    pub base_fare: u64,
    pub category: VehicleCategory,
    pub customer: String,
    pub destination: String,
    pub options: QuoteOptions,
}

impl QuoteRequest {
    /// Quote an existing history row at its recorded fare
    pub fn from_record(record: &ShipmentRecord, options: QuoteOptions) -> Self {
        Self {
            base_fare: record.fare,
            category: record.vehicle_category.clone(),
            customer: record.customer_name.clone(),
            destination: record.destination.clone(),
            options,
        }
    }
}

pub fn quote(request: &QuoteRequest) -> QuoteResult {
    price(
        request.base_fare,
        &request.options,
        request.category.is_motorcycle(),
    )
}

/// Write the receipt workbook into `dir` and return its path
pub fn issue_receipt(
    issuer: &IssuerInfo,
    dir: &Path,
    request: &QuoteRequest,
    result: &QuoteResult,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let receipt = Receipt::build(issuer, request, result, now.date());
    let path = dir.join(receipt_file_name(now, &request.customer));
    write_receipt_workbook(&receipt, &path)?;
    info!(path = %path.display(), total = result.total, "receipt issued");
    Ok(path)
}
