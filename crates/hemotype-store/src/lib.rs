//! Report persistence for hemotype.
//!
//! Holds the `reports(id, image_path, result, created_at)` table. The analysis
//! endpoint only writes here when report recording is enabled.

mod report;
mod store;

pub use report::{ReportQuery, ReportRecord};
pub use store::{ReportStore, StoreError};
