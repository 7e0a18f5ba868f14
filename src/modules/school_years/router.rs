use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    advance_school_year_term, create_school_year, delete_school_year, finish_school_year,
    get_current_school_year, get_school_year_by_id, get_school_years, start_school_year,
    sync_school_year_records, update_school_year,
};

pub fn init_school_years_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_school_year).get(get_school_years))
        .route("/current", get(get_current_school_year))
        .route(
            "/{id}",
            get(get_school_year_by_id)
                .put(update_school_year)
                .delete(delete_school_year),
        )
        .route("/{id}/start", post(start_school_year))
        .route("/{id}/next-term", post(advance_school_year_term))
        .route("/{id}/finish", post(finish_school_year))
        .route("/{id}/records", put(sync_school_year_records))
}
