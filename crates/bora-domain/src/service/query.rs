//! Record filtering for the browse view
//!
//! All conditions are conjunctive. The mixed-cargo keyword gets special
//! treatment in both the destination and category filters because shared
//! loads are recorded inconsistently: sometimes in the destination text,
//! sometimes only in the category.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::category::{contains_mixed_cargo_keyword, COMBINED_LOAD, MIXED_CARGO};
use crate::model::{ShipmentRecord, VehicleCategory};

/// Query parameters, rebuilt for every search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
    pub customer: String,
    pub destination: String,
    pub categories: BTreeSet<VehicleCategory>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = customer.into();
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_categories<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<VehicleCategory>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    fn selects_mixed_cargo(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c.as_str() == MIXED_CARGO || c.as_str() == COMBINED_LOAD)
    }
}

fn contains_ignore_case(haystack: &str, needle_upper: &str) -> bool {
    haystack.to_uppercase().contains(needle_upper)
}

fn in_date_range(record: &ShipmentRecord, params: &QueryParams) -> bool {
    params.from.map_or(true, |from| record.date >= from)
        && params.to.map_or(true, |to| record.date <= to)
}

fn matches_destination(record: &ShipmentRecord, needle_upper: &str) -> bool {
    if needle_upper.is_empty() {
        return true;
    }
    if needle_upper == MIXED_CARGO {
        return contains_mixed_cargo_keyword(&record.destination)
            || record.vehicle_category.is_mixed_cargo();
    }
    contains_ignore_case(&record.destination, needle_upper)
}

fn matches_category(record: &ShipmentRecord, params: &QueryParams, mixed_selected: bool) -> bool {
    if params.categories.is_empty() {
        return true;
    }
    if params.categories.contains(&record.vehicle_category) {
        return true;
    }
    mixed_selected
        && (contains_mixed_cargo_keyword(&record.destination)
            || record.vehicle_category.is_mixed_cargo())
}

/// Filter records, preserving their order
pub fn filter<'a>(records: &'a [ShipmentRecord], params: &QueryParams) -> Vec<&'a ShipmentRecord> {
    let customer = params.customer.trim().to_uppercase();
    let destination = params.destination.trim().to_uppercase();
    let mixed_selected = params.selects_mixed_cargo();

    records
        .iter()
        .filter(|r| in_date_range(r, params))
        .filter(|r| customer.is_empty() || contains_ignore_case(&r.customer_name, &customer))
        .filter(|r| matches_destination(r, &destination))
        .filter(|r| matches_category(r, params, mixed_selected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, customer: &str, destination: &str, category: &str) -> ShipmentRecord {
        ShipmentRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            customer_name: customer.to_string(),
            destination: destination.to_string(),
            vehicle_category: VehicleCategory::from(category),
            fare: 50_000,
        }
    }

    fn sample() -> Vec<ShipmentRecord> {
        vec![
            record("2024-03-31", "한빛상사", "군포/1톤윙", "1톤탑/윙"),
            record("2024-03-15", "Daon Corp", "안양 혼적", "1톤"),
            record("2024-03-01", "한빛상사", "수원 5톤", "5톤"),
            record("2024-02-28", "Bora", "평택", "합짐"),
            record("2024-02-10", "Mirae", "인천/오", "오토바이"),
        ]
    }

    fn d(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    #[test]
    fn test_empty_params_return_everything() {
        let records = sample();
        assert_eq!(filter(&records, &QueryParams::new()).len(), records.len());
    }

    #[test]
    fn test_date_range_inclusive() {
        let records = sample();
        let params = QueryParams::new().with_date_range(d("2024-03-01"), d("2024-03-31"));
        let hits = filter(&records, &params);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].date_string(), "2024-03-31");
        assert_eq!(hits[2].date_string(), "2024-03-01");
    }

    #[test]
    fn test_customer_case_insensitive() {
        let records = sample();
        let hits = filter(&records, &QueryParams::new().with_customer("daon"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Daon Corp");
    }

    #[test]
    fn test_destination_substring() {
        let records = sample();
        let hits = filter(&records, &QueryParams::new().with_destination("군포"));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_destination_mixed_cargo_keyword() {
        let mut records = sample();
        records.push(record("2024-01-05", "X", "부산", "혼적"));
        let hits = filter(&records, &QueryParams::new().with_destination("혼적"));
        let dests: Vec<_> = hits.iter().map(|r| r.destination.as_str()).collect();
        assert_eq!(dests, vec!["안양 혼적", "평택", "부산"]);
    }

    #[test]
    fn test_destination_mixed_cargo_keyword_matches_combined_load() {
        let records = vec![
            record("2024-04-02", "보라", "평택 합짐", "1톤"),
            record("2024-04-01", "보라", "평택", "1톤"),
        ];
        let hits = filter(&records, &QueryParams::new().with_destination("혼적"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].destination, "평택 합짐");
    }

    #[test]
    fn test_category_selection() {
        let records = sample();
        let hits = filter(&records, &QueryParams::new().with_categories(["5톤"]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].destination, "수원 5톤");
    }

    #[test]
    fn test_mixed_cargo_category_unions_keyword_matches() {
        let records = sample();
        let params = QueryParams::new().with_categories(["혼적", "5톤"]);
        let dests: Vec<_> = filter(&records, &params)
            .iter()
            .map(|r| r.destination.as_str())
            .collect();
        assert_eq!(dests, vec!["안양 혼적", "수원 5톤", "평택"]);
    }

    #[test]
    fn test_empty_category_set_is_noop() {
        let records = sample();
        let base = QueryParams::new().with_customer("한빛");
        let with_empty = base.clone().with_categories(Vec::<VehicleCategory>::new());
        assert_eq!(filter(&records, &base), filter(&records, &with_empty));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = sample();
        let params = QueryParams::new()
            .with_customer("한빛")
            .with_categories(["1톤탑/윙"])
            .with_date_range(d("2024-03-01"), None);
        let hits = filter(&records, &params);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].destination, "군포/1톤윙");
    }
}
