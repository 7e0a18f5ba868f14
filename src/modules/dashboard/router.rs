use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_approval_rate, get_dashboard, get_dashboard_counts, get_difficult_subjects,
    get_distribution, get_evaluation_stats, get_level_dashboard, get_level_performance,
    get_performance_overview, get_professors, get_professors_detailed, get_recent_evaluations,
    get_sections_comparison, get_top_students,
};

/// Routes nested under `/school-years/{id}/dashboard`.
pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/counts", get(get_dashboard_counts))
        .route("/performance", get(get_performance_overview))
        .route("/distribution", get(get_distribution))
        .route("/approval-rate", get(get_approval_rate))
        .route("/sections-comparison", get(get_sections_comparison))
        .route("/top-students", get(get_top_students))
        .route("/professors", get(get_professors))
        .route("/professors/detailed", get(get_professors_detailed))
        .route("/difficult-subjects", get(get_difficult_subjects))
        .route("/evaluations/stats", get(get_evaluation_stats))
        .route("/evaluations/recent", get(get_recent_evaluations))
        .route("/levels/{level}", get(get_level_dashboard))
        .route("/levels/{level}/performance", get(get_level_performance))
}
