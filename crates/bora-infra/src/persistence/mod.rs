//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_shipment_repo;

pub use file_shipment_repo::FileShipmentRepository;
