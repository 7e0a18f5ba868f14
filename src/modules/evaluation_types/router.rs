use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_evaluation_types;

pub fn init_evaluation_types_router() -> Router<AppState> {
    Router::new().route("/", get(get_evaluation_types))
}
