use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use yearbook_core::AppError;
use yearbook_core::errors::ErrorResponse;
use yearbook_models::ids::SchoolYearId;
use yearbook_reports::FullDashboard;
use yearbook_reports::counts::{DashboardCounts, SectionsDistribution, StudentsDistribution};
use yearbook_reports::evaluations::{EvaluationStats, RecentEvaluations};
use yearbook_reports::level_dashboard::LevelDashboard;
use yearbook_reports::performance::{LevelPerformance, PerformanceOverview};
use yearbook_reports::professors::{ProfessorsDetailedReport, ProfessorsReport};
use yearbook_reports::ranking::{
    ApprovalRate, DifficultSubjects, SectionsComparison, TopStudentsOfYear,
};

use crate::modules::dashboard::service::DashboardService;
use crate::state::AppState;

/// Students and sections per level, for the distribution charts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistributionResponse {
    pub students: StudentsDistribution,
    pub sections: SectionsDistribution,
}

/// Full dashboard of a school year
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Every dashboard report in one payload", body = FullDashboard),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FullDashboard>, AppError> {
    let store = state.store.read().await;
    let full = DashboardService::with_report(&store, SchoolYearId::from(id), "full", |r| r.full())?;

    Ok(Json(full))
}

/// Header counters
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/counts",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Student, section, subject and professor counts", body = DashboardCounts),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_dashboard_counts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardCounts>, AppError> {
    let store = state.store.read().await;
    let counts =
        DashboardService::with_report(&store, SchoolYearId::from(id), "counts", |r| r.counts())?;

    Ok(Json(counts))
}

/// Performance overview per level
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/performance",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Totals, averages and approval rate of every non-empty level", body = PerformanceOverview),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_performance_overview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PerformanceOverview>, AppError> {
    let store = state.store.read().await;
    let overview = DashboardService::with_report(&store, SchoolYearId::from(id), "performance", |r| {
        r.performance_by_level()
    })?;

    Ok(Json(overview))
}

/// Students and sections distribution
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/distribution",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Chart series of students and sections per level", body = DistributionResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_distribution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DistributionResponse>, AppError> {
    let store = state.store.read().await;
    let distribution =
        DashboardService::with_report(&store, SchoolYearId::from(id), "distribution", |r| {
            DistributionResponse {
                students: r.students_distribution(),
                sections: r.sections_distribution(),
            }
        })?;

    Ok(Json(distribution))
}

/// Approval rate summary
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/approval-rate",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Per-level approval and their unweighted mean", body = ApprovalRate),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_approval_rate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApprovalRate>, AppError> {
    let store = state.store.read().await;
    let rate = DashboardService::with_report(&store, SchoolYearId::from(id), "approval_rate", |r| {
        r.approval_rate()
    })?;

    Ok(Json(rate))
}

/// Best section per level
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/sections-comparison",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Best primary, secondary and technical section", body = SectionsComparison),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_sections_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SectionsComparison>, AppError> {
    let store = state.store.read().await;
    let comparison =
        DashboardService::with_report(&store, SchoolYearId::from(id), "sections_comparison", |r| {
            r.sections_comparison()
        })?;

    Ok(Json(comparison))
}

/// Top students of the year
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/top-students",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Top 3 of primary, general secondary and technical", body = TopStudentsOfYear),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_top_students(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TopStudentsOfYear>, AppError> {
    let store = state.store.read().await;
    let top = DashboardService::with_report(&store, SchoolYearId::from(id), "top_students", |r| {
        r.top_students()
    })?;

    Ok(Json(top))
}

/// Professor workload
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/professors",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Sections, subjects and evaluations per professor", body = ProfessorsReport),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_professors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfessorsReport>, AppError> {
    let store = state.store.read().await;
    let report = DashboardService::with_report(&store, SchoolYearId::from(id), "professors", |r| {
        r.professors()
    })?;

    Ok(Json(report))
}

/// Professor averages per student category
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/professors/detailed",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Score count and mean per category for every professor", body = ProfessorsDetailedReport),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_professors_detailed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfessorsDetailedReport>, AppError> {
    let store = state.store.read().await;
    let report =
        DashboardService::with_report(&store, SchoolYearId::from(id), "professors_detailed", |r| {
            r.professors_detailed()
        })?;

    Ok(Json(report))
}

/// Subjects with the highest failure rate
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/difficult-subjects",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Top 10 secondary subjects by failure rate", body = DifficultSubjects),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_difficult_subjects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DifficultSubjects>, AppError> {
    let store = state.store.read().await;
    let subjects =
        DashboardService::with_report(&store, SchoolYearId::from(id), "difficult_subjects", |r| {
            r.difficult_subjects()
        })?;

    Ok(Json(subjects))
}

/// Evaluation counters
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/evaluations/stats",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Evaluations by state and by level", body = EvaluationStats),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_evaluation_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvaluationStats>, AppError> {
    let store = state.store.read().await;
    let stats =
        DashboardService::with_report(&store, SchoolYearId::from(id), "evaluation_stats", |r| {
            r.evaluation_stats()
        })?;

    Ok(Json(stats))
}

/// Most recent evaluations
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/evaluations/recent",
    params(("id" = Uuid, Path, description = "School year ID")),
    responses(
        (status = 200, description = "Last 20 evaluations by date", body = RecentEvaluations),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_recent_evaluations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecentEvaluations>, AppError> {
    let store = state.store.read().await;
    let recent =
        DashboardService::with_report(&store, SchoolYearId::from(id), "recent_evaluations", |r| {
            r.recent_evaluations()
        })?;

    Ok(Json(recent))
}

/// Dashboard tab of one level
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/levels/{level}",
    params(
        ("id" = Uuid, Path, description = "School year ID"),
        ("level" = String, Path, description = "pre, primary, secondary_general or secondary_technical")
    ),
    responses(
        (status = 200, description = "Approval, performance groups and top students of the level", body = LevelDashboard),
        (status = 400, description = "Unknown level", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_level_dashboard(
    State(state): State<AppState>,
    Path((id, level)): Path<(Uuid, String)>,
) -> Result<Json<LevelDashboard>, AppError> {
    let level = DashboardService::parse_level(&level)?;
    let store = state.store.read().await;
    let dashboard =
        DashboardService::with_report(&store, SchoolYearId::from(id), "level_dashboard", |r| {
            r.level_dashboard(level)
        })?;

    Ok(Json(dashboard))
}

/// Subject-weighted performance of one level
#[utoipa::path(
    get,
    path = "/api/school-years/{id}/dashboard/levels/{level}/performance",
    params(
        ("id" = Uuid, Path, description = "School year ID"),
        ("level" = String, Path, description = "pre, primary, secondary_general or secondary_technical")
    ),
    responses(
        (status = 200, description = "Weighted performance, null when the level has no active students", body = Option<LevelPerformance>),
        (status = 400, description = "Unknown level", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_level_performance(
    State(state): State<AppState>,
    Path((id, level)): Path<(Uuid, String)>,
) -> Result<Json<Option<LevelPerformance>>, AppError> {
    let level = DashboardService::parse_level(&level)?;
    let store = state.store.read().await;
    let performance =
        DashboardService::with_report(&store, SchoolYearId::from(id), "level_performance", |r| {
            r.level_performance(level)
        })?;

    Ok(Json(performance))
}
