//! Use cases: merge job, dataset queries, quotes and receipts, update check

pub mod merge_service;
pub mod query_service;
pub mod quote_service;
pub mod receipt;
pub mod update_service;

pub use merge_service::{run_merge, MergeReport, MergeRequest, SkippedFile};
pub use query_service::DatasetSnapshot;
pub use quote_service::{issue_receipt, quote, QuoteRequest};
pub use receipt::{receipt_file_name, Receipt, ReceiptRow, RowKind};
pub use update_service::{run_startup_check, UpdateService, UpdateStatus};
