use utoipa::OpenApi;

use yearbook_core::errors::ErrorResponse;
use yearbook_core::{PaginationMeta, PaginationParams};
use yearbook_models::{
    Average, CreateSchoolYearDto, DependentCounts, EvaluationType, Grade, GradingConfig,
    GradingScale, Level, PaginatedSchoolYearsResponse, SchoolYear, SchoolYearWithStats, Term,
    UpdateSchoolYearDto, YearRecords, YearState,
};
use yearbook_reports::FullDashboard;

use crate::modules::dashboard::controller::DistributionResponse;
use crate::modules::school_years::model::RecordsSyncResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::school_years::controller::create_school_year,
        crate::modules::school_years::controller::get_school_years,
        crate::modules::school_years::controller::get_current_school_year,
        crate::modules::school_years::controller::get_school_year_by_id,
        crate::modules::school_years::controller::update_school_year,
        crate::modules::school_years::controller::delete_school_year,
        crate::modules::school_years::controller::start_school_year,
        crate::modules::school_years::controller::advance_school_year_term,
        crate::modules::school_years::controller::finish_school_year,
        crate::modules::school_years::controller::sync_school_year_records,
        crate::modules::evaluation_types::controller::get_evaluation_types,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::dashboard::controller::get_dashboard_counts,
        crate::modules::dashboard::controller::get_performance_overview,
        crate::modules::dashboard::controller::get_distribution,
        crate::modules::dashboard::controller::get_approval_rate,
        crate::modules::dashboard::controller::get_sections_comparison,
        crate::modules::dashboard::controller::get_top_students,
        crate::modules::dashboard::controller::get_professors,
        crate::modules::dashboard::controller::get_professors_detailed,
        crate::modules::dashboard::controller::get_difficult_subjects,
        crate::modules::dashboard::controller::get_evaluation_stats,
        crate::modules::dashboard::controller::get_recent_evaluations,
        crate::modules::dashboard::controller::get_level_dashboard,
        crate::modules::dashboard::controller::get_level_performance,
    ),
    components(
        schemas(
            SchoolYear,
            SchoolYearWithStats,
            PaginatedSchoolYearsResponse,
            CreateSchoolYearDto,
            UpdateSchoolYearDto,
            YearState,
            Term,
            DependentCounts,
            YearRecords,
            RecordsSyncResponse,
            EvaluationType,
            GradingScale,
            GradingConfig,
            Grade,
            Average,
            Level,
            FullDashboard,
            DistributionResponse,
            PaginationParams,
            PaginationMeta,
            ErrorResponse,
        )
    ),
    tags(
        (name = "School Years", description = "School year lifecycle and record sync"),
        (name = "Dashboard", description = "Reports over one school year's records"),
        (name = "Evaluation Types", description = "Grading catalog")
    ),
    info(
        title = "Yearbook API",
        version = "0.1.0",
        description = "School year lifecycle and dashboard reporting"
    )
)]
pub struct ApiDoc;
