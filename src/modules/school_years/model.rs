//! School year models and DTOs.
//!
//! Re-exports the shared models and adds the sync response.

pub use yearbook_models::school_years::*;

use serde::Serialize;
use utoipa::ToSchema;
use yearbook_models::DependentCounts;

/// Result of replacing a year's records.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordsSyncResponse {
    pub school_year_id: uuid::Uuid,
    /// Records stored across every collection
    pub total_records: usize,
    pub counts: DependentCounts,
}
