//! # Yearbook Models
//!
//! Domain models and DTOs for the Yearbook API.
//!
//! # Modules
//!
//! - [`ids`]: Typed record identifiers
//! - [`school_years`]: School year entity, lifecycle state machine and DTOs
//! - [`enrollments`]: Student enrollments, levels and performance summaries
//! - [`sections`]: Sections and technical-mention sections
//! - [`professors`]: Professors and subjects
//! - [`evaluations`]: Evaluations and evaluation scores
//! - [`grading`]: Grading scales, literal grades and evaluation types
//! - [`records`]: Per-year record snapshot
//! - [`dataset`]: On-disk form of the whole store
//! - [`errors`]: Lifecycle rule violations
//!
//! # Example
//!
//! ```ignore
//! use yearbook_models::school_years::{SchoolYear, start_year};
//!
//! start_year(&mut years, id, today, Utc::now())?;
//! assert!(years.iter().filter(|y| y.current).count() <= 1);
//! ```

pub mod dataset;
pub mod enrollments;
pub mod errors;
pub mod evaluations;
pub mod grading;
pub mod ids;
pub mod professors;
pub mod records;
pub mod school_years;
pub mod sections;

pub use dataset::Dataset;
pub use enrollments::{
    Average, EnrollmentState, Level, MentionScoreSummary, MentionState, MentionSubjectScore,
    Outcome, PerformanceSummary, SchoolLevel, StudentEnrollment,
};
pub use errors::YearError;
pub use evaluations::{Evaluation, EvaluationScore, EvaluationState};
pub use grading::{EvaluationType, Grade, GradingConfig, GradingScale};
pub use professors::{Professor, Subject};
pub use records::{DependentCounts, YearRecords};
pub use school_years::{
    CreateSchoolYearDto, PaginatedSchoolYearsResponse, SchoolYear, SchoolYearFilterParams,
    SchoolYearWithStats, Term, UpdateSchoolYearDto, YearState,
};
pub use sections::{MentionSection, Section, SectionAverageStats, SubjectAverageStats};
