//! Row cleaning and consolidation for the yearly merge
//!
//! Raw exports are concatenated, fares and dates are coerced, every row is
//! classified from its destination text, and the result is sorted newest
//! first. Malformed values never abort the batch: bad fares become 0 and
//! rows with unusable dates are dropped.

use chrono::NaiveDate;

use super::classifier::classify;
use crate::model::ShipmentRecord;

/// Column names of the raw exports and the consolidated dataset
pub mod columns {
    pub const RECEIPT_DATE: &str = "접수일자";
    pub const CUSTOMER: &str = "고객성명";
    pub const DESTINATION: &str = "도 착 지";
    pub const CATEGORY: &str = "차종_최종";
    pub const FARE: &str = "배달운임";

    /// Consolidated dataset columns, in output order
    pub const DATASET: [&str; 5] = [RECEIPT_DATE, CUSTOMER, DESTINATION, CATEGORY, FARE];
}

/// Header comparison ignores whitespace: `도착지` and `도 착 지` are the same column
pub fn header_matches(header: &str, column: &str) -> bool {
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    strip(header.trim_start_matches('\u{feff}')) == strip(column)
}

/// One source sheet: a header row and string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| header_matches(h, column))
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    fn cell<'a>(&self, row: &'a [String], idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
    }
}

/// Strip thousands separators and take the first digit run; 0 when absent
pub fn coerce_fare(text: &str) -> u64 {
    let cleaned = text.replace(',', "");
    let digits: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail once digits are present
    digits.parse().unwrap_or(u64::MAX)
}

const LONG_YEAR_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y년 %m월 %d일"];
const SHORT_YEAR_FORMATS: &[&str] = &["%y/%m/%d", "%y-%m-%d", "%y.%m.%d"];

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // A two-digit leading field is a short year (our own compact output)
    let lead = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let formats = if lead == 2 {
        SHORT_YEAR_FORMATS
    } else {
        LONG_YEAR_FORMATS
    };
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a receipt date in any of the shapes the exports use, ignoring a
/// trailing time component
pub fn parse_receipt_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(date) = parse_date_only(s) {
        return Some(date);
    }
    let head = s.split([' ', 'T']).next()?;
    if head.len() < s.len() {
        return parse_date_only(head);
    }
    None
}

/// Compact form written to the consolidated dataset
pub fn format_compact_date(date: NaiveDate) -> String {
    date.format("%y/%m/%d").to_string()
}

/// Consolidated rows plus counters for the merge report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<ShipmentRecord>,
    /// Dataset columns to write: those seen in any source plus the category
    pub columns: Vec<&'static str>,
    pub rows_read: usize,
    pub dropped_bad_date: usize,
    pub dropped_deleted: usize,
}

/// Concatenate, clean, classify, filter and sort the source tables
pub fn merge_tables(tables: &[RawTable]) -> MergeOutcome {
    let mut outcome = MergeOutcome {
        columns: columns::DATASET
            .iter()
            .copied()
            .filter(|c| *c == columns::CATEGORY || tables.iter().any(|t| t.has_column(c)))
            .collect(),
        ..Default::default()
    };

    for table in tables {
        let date_idx = table.column_index(columns::RECEIPT_DATE);
        let customer_idx = table.column_index(columns::CUSTOMER);
        let dest_idx = table.column_index(columns::DESTINATION);
        let fare_idx = table.column_index(columns::FARE);

        for row in &table.rows {
            outcome.rows_read += 1;

            let Some(date) = parse_receipt_date(table.cell(row, date_idx)) else {
                outcome.dropped_bad_date += 1;
                continue;
            };

            let destination = table.cell(row, dest_idx);
            let vehicle_category = classify(destination);
            if vehicle_category.is_deletion_marker() {
                outcome.dropped_deleted += 1;
                continue;
            }

            outcome.records.push(ShipmentRecord {
                date,
                customer_name: table.cell(row, customer_idx).to_string(),
                destination: destination.to_string(),
                vehicle_category,
                fare: coerce_fare(table.cell(row, fare_idx)),
            });
        }
    }

    // Stable, so same-day rows keep source order and reruns are identical
    outcome.records.sort_by(|a, b| b.date.cmp(&a.date));
    outcome
}
