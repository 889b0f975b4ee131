//! Repository adapters for persistence layer

use std::path::PathBuf;

use bora_infra::persistence::FileShipmentRepository;
use bora_types::Result;

use crate::config::Config;

/// Open the consolidated dataset in the configured data directory
pub fn open_dataset_repo(config: &Config) -> Result<FileShipmentRepository> {
    Ok(FileShipmentRepository::new(config.dataset_path()?))
}

/// Open the consolidated dataset at a custom path
pub fn open_dataset_repo_at(csv_path: PathBuf) -> FileShipmentRepository {
    FileShipmentRepository::new(csv_path)
}
