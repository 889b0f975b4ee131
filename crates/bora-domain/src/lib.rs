//! Domain layer for freight dispatch: shipment records, vehicle categories,
//! quotes, and the pure services that work on them.

pub mod model;
pub mod repository;
pub mod service;
