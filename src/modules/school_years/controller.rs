use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use yearbook_core::AppError;
use yearbook_core::errors::ErrorResponse;
use yearbook_models::YearRecords;
use yearbook_models::ids::SchoolYearId;

use crate::modules::school_years::model::{
    CreateSchoolYearDto, PaginatedSchoolYearsResponse, RecordsSyncResponse,
    SchoolYearFilterParams, SchoolYearWithStats, UpdateSchoolYearDto,
};
use crate::modules::school_years::service::SchoolYearService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a new school year
#[utoipa::path(
    post,
    path = "/api/school-years",
    request_body = CreateSchoolYearDto,
    responses(
        (status = 201, description = "School year created and marked current", body = SchoolYearWithStats),
        (status = 400, description = "Unknown evaluation type or wrong level", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn create_school_year(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSchoolYearDto>,
) -> Result<(StatusCode, Json<SchoolYearWithStats>), AppError> {
    let mut store = state.store.write().await;
    let year = SchoolYearService::create_school_year(&mut store, dto).await?;

    Ok((StatusCode::CREATED, Json(year)))
}

/// List school years
#[utoipa::path(
    get,
    path = "/api/school-years",
    params(SchoolYearFilterParams),
    responses(
        (status = 200, description = "Paginated school years, newest first", body = PaginatedSchoolYearsResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn get_school_years(
    State(state): State<AppState>,
    Query(filters): Query<SchoolYearFilterParams>,
) -> Json<PaginatedSchoolYearsResponse> {
    let store = state.store.read().await;
    Json(SchoolYearService::get_school_years(&store, filters))
}

/// Get the current school year
#[utoipa::path(
    get,
    path = "/api/school-years/current",
    responses(
        (status = 200, description = "Current school year, null when none", body = Option<SchoolYearWithStats>)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn get_current_school_year(
    State(state): State<AppState>,
) -> Json<Option<SchoolYearWithStats>> {
    let store = state.store.read().await;
    Json(SchoolYearService::get_current_school_year(&store))
}

/// Get a school year by ID
#[utoipa::path(
    get,
    path = "/api/school-years/{id}",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    responses(
        (status = 200, description = "School year with dependent counts", body = SchoolYearWithStats),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn get_school_year_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SchoolYearWithStats>, AppError> {
    let store = state.store.read().await;
    let year = SchoolYearService::get_school_year_by_id(&store, SchoolYearId::from(id))?;

    Ok(Json(year))
}

/// Update a school year
#[utoipa::path(
    put,
    path = "/api/school-years/{id}",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    request_body = UpdateSchoolYearDto,
    responses(
        (status = 200, description = "School year updated", body = SchoolYearWithStats),
        (status = 400, description = "Year finished, grading locked or invalid evaluation type", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn update_school_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolYearDto>,
) -> Result<Json<SchoolYearWithStats>, AppError> {
    let mut store = state.store.write().await;
    let year =
        SchoolYearService::update_school_year(&mut store, SchoolYearId::from(id), dto).await?;

    Ok(Json(year))
}

/// Delete a school year without dependents
#[utoipa::path(
    delete,
    path = "/api/school-years/{id}",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    responses(
        (status = 204, description = "School year deleted"),
        (status = 400, description = "School year still has sections, students, professors or evaluations", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn delete_school_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.write().await;
    SchoolYearService::delete_school_year(&mut store, SchoolYearId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Start a draft school year
#[utoipa::path(
    post,
    path = "/api/school-years/{id}/start",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    responses(
        (status = 200, description = "School year active in its first term", body = SchoolYearWithStats),
        (status = 400, description = "Not a draft or another year is active", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn start_school_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SchoolYearWithStats>, AppError> {
    let mut store = state.store.write().await;
    let year = SchoolYearService::start_school_year(&mut store, SchoolYearId::from(id)).await?;

    Ok(Json(year))
}

/// Advance an active school year to its next term
#[utoipa::path(
    post,
    path = "/api/school-years/{id}/next-term",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    responses(
        (status = 200, description = "Term advanced", body = SchoolYearWithStats),
        (status = 400, description = "Not active or already in the third term", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn advance_school_year_term(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SchoolYearWithStats>, AppError> {
    let mut store = state.store.write().await;
    let year = SchoolYearService::advance_term(&mut store, SchoolYearId::from(id)).await?;

    Ok(Json(year))
}

/// Finish an active school year in its third term
#[utoipa::path(
    post,
    path = "/api/school-years/{id}/finish",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    responses(
        (status = 200, description = "School year finished and locked", body = SchoolYearWithStats),
        (status = 400, description = "Not active or not in the third term", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state))]
pub async fn finish_school_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SchoolYearWithStats>, AppError> {
    let mut store = state.store.write().await;
    let year = SchoolYearService::finish_school_year(&mut store, SchoolYearId::from(id)).await?;

    Ok(Json(year))
}

/// Replace every record of a school year
#[utoipa::path(
    put,
    path = "/api/school-years/{id}/records",
    params(
        ("id" = Uuid, Path, description = "School year ID")
    ),
    request_body = YearRecords,
    responses(
        (status = 200, description = "Records replaced", body = RecordsSyncResponse),
        (status = 400, description = "School year is finished", body = ErrorResponse),
        (status = 404, description = "School year not found", body = ErrorResponse)
    ),
    tag = "School Years"
)]
#[instrument(skip(state, records))]
pub async fn sync_school_year_records(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(records): Json<YearRecords>,
) -> Result<Json<RecordsSyncResponse>, AppError> {
    let mut store = state.store.write().await;
    let response =
        SchoolYearService::sync_records(&mut store, SchoolYearId::from(id), records).await?;

    Ok(Json(response))
}
