//! End-to-end tests: yearly exports -> dataset -> search -> quote -> receipt

use std::path::{Path, PathBuf};

use bora_app::app::{issue_receipt, quote, run_merge, DatasetSnapshot, MergeRequest, QuoteRequest};
use bora_app::config::{Config, IssuerInfo};
use bora_domain::model::{QuoteOptions, UrgencyTier, VehicleCategory};
use bora_domain::service::QueryParams;
use chrono::NaiveDate;
use tempfile::tempdir;

const DATASET: &str = "dataset.csv";

fn write_sources(dir: &Path) {
    std::fs::write(
        dir.join("2023y.csv"),
        "접수일자,고객성명,도 착 지,배달운임\n\
         2023-11-20,한빛상사,군포/1톤윙,45000\n\
         2023-11-20,다온,평택 혼적 1톤,30000\n\
         2023-06-01,미래,인천/오,\"20,000\"\n\
         2023-05-05,미래,3P,10000\n\
         없음,미래,군포,1000\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("2024y.csv"),
        "\u{feff}접수일자,고객성명,도착지,배달운임\n\
         24/01/15,한빛상사,수원 5톤 축,80000\n\
         2024-02-01,보라,,0\n\
         2024-02-03,다온,서울 미정,5000\n",
    )
    .unwrap();
}

fn merge_request(dir: &Path) -> MergeRequest {
    MergeRequest {
        data_dir: dir.to_path_buf(),
        suffixes: vec!["y.xlsx".to_string(), "y.csv".to_string()],
        output: dir.join(DATASET),
        xlsx_output: None,
    }
}

fn d(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[test]
fn test_merge_report() {
    let dir = tempdir().unwrap();
    write_sources(dir.path());

    let report = run_merge(&merge_request(dir.path()), |_| {}).unwrap();
    assert_eq!(report.files_found, 2);
    assert_eq!(report.files_read, 2);
    assert_eq!(report.rows_read, 8);
    assert_eq!(report.dropped_bad_date, 1);
    assert_eq!(report.dropped_deleted, 1);
    assert_eq!(report.rows_written, 6);

    let text = std::fs::read_to_string(dir.path().join(DATASET)).unwrap();
    let lines: Vec<_> = text.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(
        lines,
        vec![
            "접수일자,고객성명,도 착 지,차종_최종,배달운임",
            "24/02/03,다온,서울 미정,미분류,5000",
            "24/01/15,한빛상사,수원 5톤 축,5톤축차,80000",
            "23/11/20,한빛상사,군포/1톤윙,1톤탑/윙,45000",
            "23/11/20,다온,평택 혼적 1톤,1톤,30000",
            "23/06/01,미래,인천/오,오토바이,20000",
            "23/05/05,미래,3P,3P,10000",
        ]
    );
}

#[test]
fn test_remerge_is_byte_identical() {
    let dir = tempdir().unwrap();
    write_sources(dir.path());

    run_merge(&merge_request(dir.path()), |_| {}).unwrap();
    let first = std::fs::read(dir.path().join(DATASET)).unwrap();
    run_merge(&merge_request(dir.path()), |_| {}).unwrap();
    let second = std::fs::read(dir.path().join(DATASET)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_merge_search_quote_receipt() {
    let dir = tempdir().unwrap();
    write_sources(dir.path());
    run_merge(&merge_request(dir.path()), |_| {}).unwrap();

    let config = Config {
        data_dir: Some(dir.path().to_path_buf()),
        dataset_file: DATASET.to_string(),
        ..Default::default()
    };
    let snapshot = DatasetSnapshot::load_first(&config.dataset_candidates(None));
    assert!(!snapshot.is_degraded());
    // 미분류 and box-count rows are not browsable
    assert_eq!(snapshot.len(), 4);

    let by_customer = snapshot.query(&QueryParams::new().with_customer("한빛"));
    let labels: Vec<_> = by_customer
        .iter()
        .map(|r| r.vehicle_category.as_str())
        .collect();
    assert_eq!(labels, vec!["5톤축차", "1톤탑/윙"]);

    let mixed = snapshot.query(&QueryParams::new().with_categories(["혼적"]));
    assert_eq!(mixed.len(), 1);
    assert_eq!(mixed[0].customer_name, "다온");

    let november = snapshot
        .query(&QueryParams::new().with_date_range(d("2023-11-01"), d("2023-11-30")));
    assert_eq!(november.len(), 2);

    let moto = snapshot.query(&QueryParams::new().with_categories(["오토바이"]));
    assert_eq!(moto.len(), 1);
    let request = QuoteRequest::from_record(
        moto[0],
        QuoteOptions {
            urgency: UrgencyTier::Urgent,
            ..Default::default()
        },
    );
    assert_eq!(request.category, VehicleCategory::from("오토바이"));
    let result = quote(&request);
    assert_eq!(result.subtotal, 30_000);
    assert_eq!(result.tax, 3_000);
    assert_eq!(result.total, 33_000);

    let receipts = dir.path().join("receipts");
    let now = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let path = issue_receipt(&IssuerInfo::default(), &receipts, &request, &result, now).unwrap();
    assert_eq!(path, receipts.join("20240501_1000_미래_영수증.xlsx"));
    assert!(path.is_file());
}

#[test]
fn test_missing_dataset_degrades() {
    let dir = tempdir().unwrap();
    let config = Config {
        data_dir: Some(dir.path().to_path_buf()),
        dataset_file: "missing.csv".to_string(),
        ..Default::default()
    };
    let candidates: Vec<PathBuf> = config.dataset_candidates(None);
    let snapshot = DatasetSnapshot::load_first(&candidates);

    assert!(snapshot.is_degraded());
    assert!(snapshot.query(&QueryParams::new()).is_empty());
    let groups = snapshot.category_groups();
    assert!(groups.iter().any(|g| g.is_mixed_cargo()));
}
