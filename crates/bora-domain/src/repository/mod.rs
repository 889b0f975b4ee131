//! Repository trait definitions for data persistence

use bora_types::Error;

use crate::model::ShipmentRecord;

/// Read access to the consolidated shipment dataset
pub trait ShipmentRepository {
    /// Load every record, newest first
    fn find_all(&self) -> Result<Vec<ShipmentRecord>, Error>;
}

/// Write access used by the merge job. Each save replaces the whole dataset.
pub trait DatasetWriter {
    fn replace_all(&self, records: &[ShipmentRecord], columns: &[&str]) -> Result<(), Error>;
}
