use chrono::Utc;
use tracing::{info, instrument, warn};

use yearbook_core::{AppError, paginate};
use yearbook_models::ids::SchoolYearId;
use yearbook_models::{YearError, YearRecords};
use yearbook_observability::{track_records_synced, track_year_transition};

use crate::modules::school_years::model::{
    CreateSchoolYearDto, PaginatedSchoolYearsResponse, RecordsSyncResponse, SchoolYear,
    SchoolYearFilterParams, SchoolYearWithStats, UpdateSchoolYearDto, start_year,
};
use crate::store::SchoolStore;

/// Maps a lifecycle rule violation to its HTTP error. Unknown years are
/// 404, every other rule is 400.
pub fn year_error(err: YearError) -> AppError {
    match err {
        YearError::NotFound => AppError::not_found(err),
        _ => {
            warn!(error = %err, "School year rule rejected the operation");
            AppError::bad_request(err)
        }
    }
}

fn with_stats(store: &SchoolStore, year: &SchoolYear) -> SchoolYearWithStats {
    SchoolYearWithStats::new(year.clone(), store.counts(year.id))
}

fn find(store: &SchoolStore, id: SchoolYearId) -> Result<&SchoolYear, AppError> {
    store.year(id).ok_or_else(|| year_error(YearError::NotFound))
}

fn find_mut(store: &mut SchoolStore, id: SchoolYearId) -> Result<&mut SchoolYear, AppError> {
    store
        .year_mut(id)
        .ok_or_else(|| year_error(YearError::NotFound))
}

pub struct SchoolYearService;

impl SchoolYearService {
    /// Creates a draft year. The new year becomes the current one.
    #[instrument(skip(store))]
    pub async fn create_school_year(
        store: &mut SchoolStore,
        dto: CreateSchoolYearDto,
    ) -> Result<SchoolYearWithStats, AppError> {
        dto.check_references(store.catalog()).map_err(year_error)?;

        let year = store
            .commit(|store| {
                let year = store.insert_year(SchoolYear::new(dto, Utc::now()));
                Ok::<_, AppError>(year.clone())
            })
            .await?;

        track_year_transition("created");
        info!(school_year_id = %year.id, name = %year.name, "School year created");
        Ok(with_stats(store, &year))
    }

    /// Newest first, optionally filtered by state.
    #[instrument(skip(store))]
    pub fn get_school_years(
        store: &SchoolStore,
        filters: SchoolYearFilterParams,
    ) -> PaginatedSchoolYearsResponse {
        let mut years: Vec<&SchoolYear> = store
            .years()
            .iter()
            .filter(|year| filters.state.is_none_or(|state| year.state == state))
            .collect();
        years.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let rows = years.into_iter().map(|year| with_stats(store, year)).collect();
        let (data, meta) = paginate(rows, &filters.pagination);
        PaginatedSchoolYearsResponse { data, meta }
    }

    #[instrument(skip(store))]
    pub fn get_current_school_year(store: &SchoolStore) -> Option<SchoolYearWithStats> {
        store.current_year().map(|year| with_stats(store, year))
    }

    #[instrument(skip(store))]
    pub fn get_school_year_by_id(
        store: &SchoolStore,
        id: SchoolYearId,
    ) -> Result<SchoolYearWithStats, AppError> {
        let year = find(store, id)?;
        Ok(with_stats(store, year))
    }

    /// Renames the year or changes its evaluation types.
    ///
    /// Finished years are locked. Evaluation types are frozen once the year
    /// has evaluations.
    #[instrument(skip(store))]
    pub async fn update_school_year(
        store: &mut SchoolStore,
        id: SchoolYearId,
        dto: UpdateSchoolYearDto,
    ) -> Result<SchoolYearWithStats, AppError> {
        let has_evaluations = store.records(id).has_evaluations();
        let year = find(store, id)?;
        year.ensure_not_finished().map_err(year_error)?;
        dto.check_references(store.catalog()).map_err(year_error)?;
        year.check_grading_change(&dto, has_evaluations)
            .map_err(year_error)?;

        let year = store
            .commit(|store| {
                let year = find_mut(store, id)?;
                year.apply_update(dto, Utc::now());
                Ok::<_, AppError>(year.clone())
            })
            .await?;

        track_year_transition("updated");
        info!(school_year_id = %id, "School year updated");
        Ok(with_stats(store, &year))
    }

    /// Deletes a year without dependents.
    #[instrument(skip(store))]
    pub async fn delete_school_year(
        store: &mut SchoolStore,
        id: SchoolYearId,
    ) -> Result<(), AppError> {
        let counts = store.counts(id);
        find(store, id)?
            .check_deletable(&counts)
            .map_err(year_error)?;

        store
            .commit(|store| {
                store.remove_year(id);
                Ok::<_, AppError>(())
            })
            .await?;

        track_year_transition("deleted");
        info!(school_year_id = %id, "School year deleted");
        Ok(())
    }

    /// Starts a draft year: it becomes active and the only current year.
    #[instrument(skip(store))]
    pub async fn start_school_year(
        store: &mut SchoolStore,
        id: SchoolYearId,
    ) -> Result<SchoolYearWithStats, AppError> {
        let now = Utc::now();
        store
            .commit(|store| {
                start_year(store.years_mut(), id, now.date_naive(), now).map_err(year_error)
            })
            .await?;

        track_year_transition("started");
        let year = find(store, id)?;
        info!(school_year_id = %id, name = %year.name, "School year started");
        Ok(with_stats(store, year))
    }

    #[instrument(skip(store))]
    pub async fn advance_term(
        store: &mut SchoolStore,
        id: SchoolYearId,
    ) -> Result<SchoolYearWithStats, AppError> {
        let term = store
            .commit(|store| {
                find_mut(store, id)?
                    .advance_term(Utc::now())
                    .map_err(year_error)
            })
            .await?;

        track_year_transition("term_advanced");
        info!(school_year_id = %id, term = %term, "School year moved to next term");
        Self::get_school_year_by_id(store, id)
    }

    /// Finishes an active year in its third term.
    #[instrument(skip(store))]
    pub async fn finish_school_year(
        store: &mut SchoolStore,
        id: SchoolYearId,
    ) -> Result<SchoolYearWithStats, AppError> {
        let now = Utc::now();
        store
            .commit(|store| {
                find_mut(store, id)?
                    .finish(now.date_naive(), now)
                    .map_err(year_error)
            })
            .await?;

        track_year_transition("finished");
        info!(school_year_id = %id, "School year finished");
        Self::get_school_year_by_id(store, id)
    }

    /// Replaces every record of the year. Finished years are locked.
    #[instrument(skip(store, records))]
    pub async fn sync_records(
        store: &mut SchoolStore,
        id: SchoolYearId,
        records: YearRecords,
    ) -> Result<RecordsSyncResponse, AppError> {
        find(store, id)?.ensure_not_finished().map_err(year_error)?;

        let total_records = records.total_records();
        let counts = records.dependent_counts();
        store
            .commit(|store| {
                store.replace_records(id, records);
                Ok::<_, AppError>(())
            })
            .await?;

        track_records_synced(total_records);
        info!(school_year_id = %id, total_records, "School year records synced");
        Ok(RecordsSyncResponse {
            school_year_id: id.into_inner(),
            total_records,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use yearbook_core::PaginationParams;
    use yearbook_models::ids::{EvaluationId, EvaluationTypeId, ProfessorId, SectionId};
    use yearbook_models::{Evaluation, EvaluationState, SchoolLevel, Term, YearState};

    fn create_dto(name: &str) -> CreateSchoolYearDto {
        CreateSchoolYearDto {
            name: name.to_string(),
            evaluation_type_secondary: EvaluationTypeId::from_u128(1),
            evaluation_type_primary: EvaluationTypeId::from_u128(3),
            evaluation_type_preschool: EvaluationTypeId::from_u128(5),
        }
    }

    fn evaluation() -> Evaluation {
        Evaluation {
            id: EvaluationId::new(),
            name: "Quiz".to_string(),
            date: None,
            state: EvaluationState::Draft,
            kind: SchoolLevel::Secondary,
            professor_id: ProfessorId::new(),
            section_id: SectionId::new(),
            subject_id: None,
            score_average: 0.0,
        }
    }

    async fn created(store: &mut SchoolStore, name: &str) -> SchoolYearId {
        SchoolYearService::create_school_year(store, create_dto(name))
            .await
            .unwrap()
            .year
            .id
    }

    #[tokio::test]
    async fn test_create_rejects_reference_for_wrong_level() {
        let mut store = SchoolStore::new();
        let mut dto = create_dto("2025-2026");
        dto.evaluation_type_secondary = EvaluationTypeId::from_u128(3);

        let err = SchoolYearService::create_school_year(&mut store, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(store.years().is_empty());
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let mut store = SchoolStore::new();
        let id = created(&mut store, "2025-2026").await;

        let year = SchoolYearService::start_school_year(&mut store, id)
            .await
            .unwrap();
        assert_eq!(year.year.state, YearState::Active);
        assert_eq!(year.term_display, "First term");

        SchoolYearService::advance_term(&mut store, id).await.unwrap();
        let year = SchoolYearService::advance_term(&mut store, id).await.unwrap();
        assert_eq!(year.year.term, Term::Third);

        let err = SchoolYearService::advance_term(&mut store, id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let year = SchoolYearService::finish_school_year(&mut store, id)
            .await
            .unwrap();
        assert!(year.is_locked);
        assert!(!year.year.current);

        let err = SchoolYearService::update_school_year(
            &mut store,
            id,
            UpdateSchoolYearDto {
                name: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_start_fails_while_another_is_active() {
        let mut store = SchoolStore::new();
        let first = created(&mut store, "2024-2025").await;
        SchoolYearService::start_school_year(&mut store, first)
            .await
            .unwrap();
        let second = created(&mut store, "2025-2026").await;

        let err = SchoolYearService::start_school_year(&mut store, second)
            .await
            .unwrap_err();
        assert!(err.error.to_string().contains("2024-2025"));
        assert_eq!(store.year(first).unwrap().state, YearState::Active);
        assert_eq!(store.year(second).unwrap().state, YearState::Draft);
    }

    #[tokio::test]
    async fn test_unknown_year_is_not_found() {
        let mut store = SchoolStore::new();
        let err = SchoolYearService::start_school_year(&mut store, SchoolYearId::new())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_year_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        let mut store = SchoolStore::load(&path).unwrap();
        let id = created(&mut store, "2025-2026").await;

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = SchoolYearService::start_school_year(&mut store, id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let year = store.year(id).unwrap();
        assert_eq!(year.state, YearState::Draft);
        assert!(year.start_date_real.is_none());

        let err = SchoolYearService::sync_records(
            &mut store,
            id,
            YearRecords {
                evaluations: vec![evaluation()],
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.counts(id).evaluations, 0);
    }

    #[tokio::test]
    async fn test_grading_frozen_once_evaluations_exist() {
        let mut store = SchoolStore::new();
        let id = created(&mut store, "2025-2026").await;
        SchoolYearService::sync_records(
            &mut store,
            id,
            YearRecords {
                evaluations: vec![evaluation()],
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let change = UpdateSchoolYearDto {
            evaluation_type_secondary: Some(EvaluationTypeId::from_u128(2)),
            ..Default::default()
        };
        let err = SchoolYearService::update_school_year(&mut store, id, change)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let same = UpdateSchoolYearDto {
            name: Some("2025/2026".to_string()),
            evaluation_type_secondary: Some(EvaluationTypeId::from_u128(1)),
            ..Default::default()
        };
        let year = SchoolYearService::update_school_year(&mut store, id, same)
            .await
            .unwrap();
        assert_eq!(year.year.name, "2025/2026");
    }

    #[tokio::test]
    async fn test_delete_checks_dependents() {
        let mut store = SchoolStore::new();
        let id = created(&mut store, "2025-2026").await;
        SchoolYearService::sync_records(
            &mut store,
            id,
            YearRecords {
                evaluations: vec![evaluation(), evaluation()],
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = SchoolYearService::delete_school_year(&mut store, id)
            .await
            .unwrap_err();
        assert!(err.error.to_string().contains("has 2 recorded evaluation(s)"));

        SchoolYearService::sync_records(&mut store, id, YearRecords::default())
            .await
            .unwrap();
        SchoolYearService::delete_school_year(&mut store, id)
            .await
            .unwrap();
        assert!(store.years().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_state_and_paginates() {
        let mut store = SchoolStore::new();
        for name in ["2022-2023", "2023-2024", "2024-2025"] {
            created(&mut store, name).await;
        }
        let active = created(&mut store, "2025-2026").await;
        SchoolYearService::start_school_year(&mut store, active)
            .await
            .unwrap();

        let drafts = SchoolYearService::get_school_years(
            &store,
            SchoolYearFilterParams {
                state: Some(YearState::Draft),
                pagination: PaginationParams {
                    limit: Some(2),
                    ..Default::default()
                },
            },
        );
        assert_eq!(drafts.meta.total, 3);
        assert_eq!(drafts.data.len(), 2);
        assert!(drafts.meta.has_more);

        let current = SchoolYearService::get_current_school_year(&store).unwrap();
        assert_eq!(current.year.id, active);
    }
}
