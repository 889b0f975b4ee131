//! File-based implementation of ShipmentRepository

use std::path::{Path, PathBuf};

use bora_domain::model::ShipmentRecord;
use bora_domain::repository::{DatasetWriter, ShipmentRepository};
use bora_types::Error;

use crate::dataset_csv::{read_dataset, write_dataset};

/// Consolidated dataset stored as a single CSV file
pub struct FileShipmentRepository {
    csv_path: PathBuf,
}

impl FileShipmentRepository {
    pub fn new(csv_path: PathBuf) -> Self {
        Self { csv_path }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn exists(&self) -> bool {
        self.csv_path.is_file()
    }
}

impl ShipmentRepository for FileShipmentRepository {
    fn find_all(&self) -> Result<Vec<ShipmentRecord>, Error> {
        read_dataset(&self.csv_path)
    }
}

impl DatasetWriter for FileShipmentRepository {
    fn replace_all(&self, records: &[ShipmentRecord], columns: &[&str]) -> Result<(), Error> {
        write_dataset(&self.csv_path, records, columns)
    }
}
