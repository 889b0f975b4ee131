//! Merge Service - consolidate yearly exports into the priced dataset
//!
//! 1. Find `*y.xlsx` / `*y.csv` exports in the data directory
//! 2. Load each one, skipping files that cannot be read
//! 3. Clean, classify, filter and sort via the domain merge
//! 4. Overwrite the dataset file (and optionally a workbook copy)

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use bora_domain::repository::DatasetWriter;
use bora_domain::service::{merge_tables, RawTable};
use bora_infra::source::load_source_table;
use bora_types::{Error, Result};

use crate::export::export_dataset_to_excel;
use crate::repository::open_dataset_repo_at;
use crate::scanner::scan_source_files;

/// Inputs of one merge run
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub data_dir: PathBuf,
    /// File name endings of yearly exports, matched case-insensitively
    pub suffixes: Vec<String>,
    pub output: PathBuf,
    /// Also write the dataset as a workbook at this path
    pub xlsx_output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What a merge run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub files_found: usize,
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
    pub rows_read: usize,
    pub dropped_bad_date: usize,
    pub dropped_deleted: usize,
    pub rows_written: usize,
    /// `None` when nothing could be read and no file was written
    pub output_path: Option<PathBuf>,
    pub xlsx_path: Option<PathBuf>,
}

impl MergeReport {
    pub fn wrote_output(&self) -> bool {
        self.output_path.is_some()
    }
}

/// Run the merge. `on_file` is called before each source file is loaded,
/// so callers can drive a progress bar.
pub fn run_merge<F>(request: &MergeRequest, mut on_file: F) -> Result<MergeReport>
where
    F: FnMut(&Path),
{
    let files = scan_source_files(&request.data_dir, &request.suffixes)?;
    if files.is_empty() {
        return Err(Error::NoSourceFiles {
            dir: request.data_dir.display().to_string(),
            suffixes: request.suffixes.join(", "),
        });
    }
    info!(count = files.len(), dir = %request.data_dir.display(), "source files found");

    let mut report = MergeReport {
        files_found: files.len(),
        ..Default::default()
    };

    let mut tables: Vec<RawTable> = Vec::with_capacity(files.len());
    for path in &files {
        on_file(path);
        match load_source_table(path) {
            Ok(table) => tables.push(table),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable source file");
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    report.files_read = tables.len();

    if tables.is_empty() {
        warn!("no source file could be read, dataset left untouched");
        return Ok(report);
    }

    let outcome = merge_tables(&tables);
    report.rows_read = outcome.rows_read;
    report.dropped_bad_date = outcome.dropped_bad_date;
    report.dropped_deleted = outcome.dropped_deleted;
    report.rows_written = outcome.records.len();

    if outcome.records.is_empty() {
        warn!("merge produced no rows, writing header only");
    }

    let repo = open_dataset_repo_at(request.output.clone());
    repo.replace_all(&outcome.records, &outcome.columns)?;
    report.output_path = Some(request.output.clone());
    info!(
        path = %request.output.display(),
        rows = report.rows_written,
        "dataset written"
    );

    if let Some(xlsx) = &request.xlsx_output {
        export_dataset_to_excel(&outcome.records, &outcome.columns, xlsx)?;
        report.xlsx_path = Some(xlsx.clone());
    }

    Ok(report)
}
