use axum::{Json, extract::State};
use tracing::instrument;

use yearbook_models::EvaluationType;

use crate::state::AppState;

/// List the evaluation type catalog
#[utoipa::path(
    get,
    path = "/api/evaluation-types",
    responses(
        (status = 200, description = "Evaluation types with their level and grading scale", body = Vec<EvaluationType>)
    ),
    tag = "Evaluation Types"
)]
#[instrument(skip(state))]
pub async fn get_evaluation_types(State(state): State<AppState>) -> Json<Vec<EvaluationType>> {
    let store = state.store.read().await;
    Json(store.catalog().to_vec())
}
