//! Query Service - read-only access to the consolidated dataset
//!
//! The dataset is loaded once into an owned snapshot and queried in memory.
//! A missing or broken file is not fatal: the snapshot is empty and marked
//! degraded so the front end can say "no data" instead of failing.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use bora_domain::model::{ShipmentRecord, VehicleCategory};
use bora_domain::repository::ShipmentRepository;
use bora_domain::service::{filter, group_categories, CategoryGroup, QueryParams};

use crate::repository::open_dataset_repo_at;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSnapshot {
    records: Vec<ShipmentRecord>,
    source: Option<PathBuf>,
}

/// Browsing skips rows that have no usable vehicle type
fn is_browsable(record: &ShipmentRecord) -> bool {
    !record.vehicle_category.is_unclassified() && !record.vehicle_category.is_box_count()
}

impl DatasetSnapshot {
    /// Snapshot over in-memory records, applying the browse rules
    pub fn from_records(records: Vec<ShipmentRecord>, source: Option<PathBuf>) -> Self {
        Self {
            records: records.into_iter().filter(is_browsable).collect(),
            source,
        }
    }

    /// Empty snapshot used when no dataset could be loaded
    pub fn degraded() -> Self {
        Self::default()
    }

    pub fn load_from<R: ShipmentRepository>(repo: &R, source: &Path) -> Self {
        match repo.find_all() {
            Ok(records) => {
                let snapshot = Self::from_records(records, Some(source.to_path_buf()));
                info!(
                    path = %source.display(),
                    rows = snapshot.records.len(),
                    "dataset loaded"
                );
                snapshot
            }
            Err(e) => {
                warn!(path = %source.display(), error = %e, "dataset unreadable, continuing without data");
                Self::degraded()
            }
        }
    }

    /// Load from the first candidate path that exists
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from(&open_dataset_repo_at(path.clone()), path),
            None => {
                warn!(?candidates, "no dataset file found, continuing without data");
                Self::degraded()
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source.is_none()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, params: &QueryParams) -> Vec<&ShipmentRecord> {
        filter(&self.records, params)
    }

    /// The `n`th (1-based) row of a query, in the order `query` lists them
    pub fn pick(&self, params: &QueryParams, n: usize) -> Option<&ShipmentRecord> {
        let index = n.checked_sub(1)?;
        self.query(params).get(index).copied()
    }

    /// Category labels grouped for selection
    pub fn category_groups(&self) -> Vec<CategoryGroup> {
        group_categories(self.records.iter().map(|r| &r.vehicle_category))
    }

    pub fn has_category(&self, category: &VehicleCategory) -> bool {
        self.records.iter().any(|r| &r.vehicle_category == category)
    }
}
