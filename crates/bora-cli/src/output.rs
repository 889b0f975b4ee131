//! Output formatting module

use bora_app::app::{MergeReport, QuoteRequest, UpdateStatus};
use bora_domain::model::{format_won, QuoteResult, ShipmentRecord, VehicleCategory};
use bora_domain::service::CategoryGroup;
use bora_types::{OutputFormat, Result};
use serde::Serialize;
use std::path::Path;

const RULE: usize = 40;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_merge_report(output_format: OutputFormat, report: &MergeReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }

    println!("\nMerge Result");
    println!("============");
    println!("Files found:      {}", report.files_found);
    println!("Files read:       {}", report.files_read);
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    println!("Rows read:        {}", report.rows_read);
    println!("Bad dates:        {}", report.dropped_bad_date);
    println!("Deleted rows:     {}", report.dropped_deleted);
    println!("Rows written:     {}", report.rows_written);
    match &report.output_path {
        Some(path) => println!("Dataset:          {}", path.display()),
        None => println!("Dataset:          (not written)"),
    }
    if let Some(path) = &report.xlsx_path {
        println!("Workbook:         {}", path.display());
    }
    Ok(())
}

#[derive(Serialize)]
struct Classification<'a> {
    input: &'a str,
    category: &'a VehicleCategory,
}

pub fn output_classifications(
    output_format: OutputFormat,
    results: &[(String, VehicleCategory)],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let rows: Vec<_> = results
            .iter()
            .map(|(input, category)| Classification { input, category })
            .collect();
        return print_json(&rows);
    }

    for (input, category) in results {
        println!("{:<30} {}", input, category);
    }
    Ok(())
}

pub fn output_records(
    output_format: OutputFormat,
    records: &[&ShipmentRecord],
    total: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(records);
    }

    println!(
        "{:<12} {:<16} {:<14} {:>10}  {}",
        "날짜", "거래처명", "차종/옵션", "기존단가", "도착지 상세"
    );
    println!("{}", "-".repeat(80));
    for r in records {
        println!(
            "{:<12} {:<16} {:<14} {:>10}  {}",
            r.date_string(),
            r.customer_name,
            r.vehicle_category.as_str(),
            format_won(r.fare),
            r.destination
        );
    }
    if records.len() < total {
        println!("\n{} of {} rows shown", records.len(), total);
    } else {
        println!("\n{} rows", total);
    }
    Ok(())
}

pub fn output_groups(output_format: OutputFormat, groups: &[CategoryGroup]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(groups);
    }

    for group in groups {
        let labels: Vec<_> = group.categories.iter().map(VehicleCategory::as_str).collect();
        println!("{:<10} {}", group.name, labels.join(", "));
    }
    Ok(())
}

#[derive(Serialize)]
struct QuoteOutput<'a> {
    request: &'a QuoteRequest,
    result: &'a QuoteResult,
    receipt: Option<&'a Path>,
}

/// Itemized breakdown in the 상세 견적 내역 layout
pub fn breakdown_text(request: &QuoteRequest, result: &QuoteResult) -> String {
    let mut text = format!("■ 기본 운임: {}원\n", format_won(result.base_fare));
    text.push_str(&"-".repeat(RULE));
    text.push('\n');

    if result.round_trip_surcharge > 0 {
        text.push_str(&format!(
            "+ [왕복 할증] 70% 추가: {}원\n",
            format_won(result.round_trip_surcharge)
        ));
    }
    if result.wait_surcharge > 0 {
        text.push_str(&format!(
            "+ [대기료] {}분: {}원\n",
            request.options.wait_minutes,
            format_won(result.wait_surcharge)
        ));
    }
    if result.holiday_surcharge > 0 {
        text.push_str(&format!(
            "+ [휴일/야간] 할증: {}원\n",
            format_won(result.holiday_surcharge)
        ));
    }
    if result.misc_surcharge > 0 {
        text.push_str(&format!(
            "+ [오토바이] 옵션: {}원\n",
            format_won(result.misc_surcharge)
        ));
    }

    text.push_str(&"-".repeat(RULE));
    text.push('\n');
    text.push_str(&format!("▶ 공급가액: {}원\n", format_won(result.subtotal)));
    if request.options.include_tax {
        text.push_str(&format!("▶ 부가세(10%): {}원\n", format_won(result.tax)));
    }
    text.push_str(&"=".repeat(RULE));
    text.push('\n');
    text.push_str(&format!("최종 청구 금액: {}원", format_won(result.total)));
    text
}

pub fn output_quote(
    output_format: OutputFormat,
    request: &QuoteRequest,
    result: &QuoteResult,
    receipt: Option<&Path>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&QuoteOutput {
            request,
            result,
            receipt,
        });
    }

    println!("\n차종: {}   |   도착지: {}", request.category, request.destination);
    if !request.customer.is_empty() {
        println!("거래처: {}", request.customer);
    }
    println!();
    println!("{}", breakdown_text(request, result));
    if let Some(path) = receipt {
        println!("\nReceipt saved: {}", path.display());
    }
    Ok(())
}

pub fn output_update_status(output_format: OutputFormat, status: &UpdateStatus) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(status);
    }
    println!("{}", status);
    Ok(())
}
