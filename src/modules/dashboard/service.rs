use tracing::{debug, instrument};

use yearbook_core::AppError;
use yearbook_models::Level;
use yearbook_models::YearError;
use yearbook_models::ids::SchoolYearId;
use yearbook_observability::track_dashboard_report;
use yearbook_reports::YearReport;

use crate::modules::school_years::service::year_error;
use crate::store::SchoolStore;

pub struct DashboardService;

impl DashboardService {
    /// Builds the report of year `id` and hands it to `build`.
    ///
    /// `report` names the output for metrics and logs.
    #[instrument(skip(store, build))]
    pub fn with_report<T>(
        store: &SchoolStore,
        id: SchoolYearId,
        report: &str,
        build: impl FnOnce(&YearReport<'_>) -> T,
    ) -> Result<T, AppError> {
        let year = store.year(id).ok_or_else(|| year_error(YearError::NotFound))?;
        let grading = year.grading_config(store.catalog());
        let records = store.records(id);

        debug!(
            school_year_id = %id,
            enrollments = records.enrollments.len(),
            evaluations = records.evaluations.len(),
            "Building dashboard report"
        );
        let output = build(&YearReport::new(records, grading));
        track_dashboard_report(report);
        Ok(output)
    }

    /// Parses a level path segment (`pre`, `primary`, `secondary_general`,
    /// `secondary_technical`).
    pub fn parse_level(raw: &str) -> Result<Level, AppError> {
        raw.parse::<Level>()
            .map_err(|message| AppError::bad_request(anyhow::anyhow!(message)))
    }
}
