//! Domain services

pub mod category_groups;
pub mod classifier;
pub mod ingest;
pub mod pricing;
pub mod query;

pub use category_groups::{group_categories, CategoryGroup};
pub use classifier::classify;
pub use ingest::{merge_tables, MergeOutcome, RawTable};
pub use pricing::price;
pub use query::{filter, QueryParams};
