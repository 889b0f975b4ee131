//! Domain model types

pub mod category;
pub mod quote;
pub mod shipment;

pub use category::VehicleCategory;
pub use quote::{format_won, LineItem, QuoteOptions, QuoteResult, UrgencyTier};
pub use shipment::ShipmentRecord;
