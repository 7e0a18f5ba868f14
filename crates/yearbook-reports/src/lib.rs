//! # Yearbook Reports
//!
//! Pure aggregations behind the school year dashboard. Every function reads
//! a [`YearRecords`](yearbook_models::YearRecords) snapshot and never fails:
//! missing summaries count as failed with a zero average.
//!
//! - [`partition`]: active students split into the four level buckets
//! - [`counts`]: header counters and distributions
//! - [`performance`]: weighted level performance and the per-level overview
//! - [`ranking`]: top students, best sections, difficult subjects, approval rate
//! - [`professors`]: professor workload and per-category averages
//! - [`evaluations`]: evaluation counters and the recent list
//! - [`level_dashboard`]: the tab of a single level
//! - [`dashboard`]: [`YearReport`] facade and the bundled payload

pub mod counts;
pub mod dashboard;
pub mod evaluations;
pub mod level_dashboard;
pub mod partition;
pub mod performance;
pub mod professors;
pub mod ranking;

#[cfg(test)]
mod fixtures;

pub use dashboard::{FullDashboard, YearReport};
pub use partition::LevelBuckets;
