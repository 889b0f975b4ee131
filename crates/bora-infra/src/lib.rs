//! Infrastructure layer: file formats, persistence and network access

pub mod dataset_csv;
pub mod persistence;
pub mod remote;
pub mod source;
pub mod source_csv;
pub mod source_xlsx;
