//! School year entity, its lifecycle, and DTOs.
//!
//! A year is created in draft, started (becoming active and current),
//! advanced through three terms, and finished. A finished year is locked.
//!
//! ```text
//! draft --start--> active(term 1) --next--> term 2 --next--> term 3 --finish--> finished
//! ```
//!
//! Operations that touch other years (`start_year`, `register_new`) work on
//! the whole collection so the "one current, one active" invariant can be
//! upheld in a single step.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use yearbook_core::{PaginationMeta, PaginationParams};

use crate::enrollments::SchoolLevel;
use crate::errors::YearError;
use crate::grading::{EvaluationType, GradingConfig, GradingScale};
use crate::ids::{EvaluationTypeId, SchoolYearId};
use crate::records::DependentCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum YearState {
    #[default]
    Draft,
    Active,
    Finished,
}

/// Current term of an active year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema)]
pub enum Term {
    #[default]
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
}

impl Term {
    pub fn next(self) -> Option<Term> {
        match self {
            Term::First => Some(Term::Second),
            Term::Second => Some(Term::Third),
            Term::Third => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Term::First => "First term",
            Term::Second => "Second term",
            Term::Third => "Third term",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            Term::First => 1,
            Term::Second => 2,
            Term::Third => 3,
        };
        write!(f, "{}", n)
    }
}

/// School year entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SchoolYear {
    /// Unique identifier of the school year
    pub id: SchoolYearId,
    /// Name of the school year (e.g., "2025-2026")
    pub name: String,
    /// Whether this is the year the dashboard shows by default
    pub current: bool,
    pub state: YearState,
    /// Current term, meaningful while active
    pub term: Term,
    /// Date the year was actually started
    pub start_date_real: Option<NaiveDate>,
    /// Date the year was actually finished
    pub end_date_real: Option<NaiveDate>,
    /// Evaluation type used for secondary grading
    pub evaluation_type_secondary: EvaluationTypeId,
    /// Evaluation type used for primary grading
    pub evaluation_type_primary: EvaluationTypeId,
    /// Evaluation type used for preschool grading
    pub evaluation_type_preschool: EvaluationTypeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchoolYear {
    pub fn new(dto: CreateSchoolYearDto, now: DateTime<Utc>) -> Self {
        Self {
            id: SchoolYearId::new(),
            name: dto.name,
            current: true,
            state: YearState::Draft,
            term: Term::First,
            start_date_real: None,
            end_date_real: None,
            evaluation_type_secondary: dto.evaluation_type_secondary,
            evaluation_type_primary: dto.evaluation_type_primary,
            evaluation_type_preschool: dto.evaluation_type_preschool,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state == YearState::Finished
    }

    pub fn term_display(&self) -> &'static str {
        match self.state {
            YearState::Active => self.term.label(),
            YearState::Finished => "Finished",
            YearState::Draft => "Not started",
        }
    }

    /// Resolves the three references against the catalog. Unknown
    /// references fall back to [`GradingScale::Twenty`].
    pub fn grading_config(&self, catalog: &[EvaluationType]) -> GradingConfig {
        let scale = |id: EvaluationTypeId| {
            catalog
                .iter()
                .find(|kind| kind.id == id)
                .map_or(GradingScale::Twenty, |kind| kind.scale)
        };

        GradingConfig {
            preschool: scale(self.evaluation_type_preschool),
            primary: scale(self.evaluation_type_primary),
            secondary: scale(self.evaluation_type_secondary),
        }
    }

    pub fn advance_term(&mut self, now: DateTime<Utc>) -> Result<Term, YearError> {
        if self.state != YearState::Active {
            return Err(YearError::NotActiveForTermChange);
        }
        let next = self.term.next().ok_or(YearError::AlreadyFinalTerm)?;
        self.term = next;
        self.updated_at = now;
        Ok(next)
    }

    pub fn finish(&mut self, today: NaiveDate, now: DateTime<Utc>) -> Result<(), YearError> {
        if self.state != YearState::Active {
            return Err(YearError::NotActiveForFinish);
        }
        if self.term != Term::Third {
            return Err(YearError::TermNotFinal { term: self.term });
        }
        self.state = YearState::Finished;
        self.current = false;
        self.end_date_real = Some(today);
        self.updated_at = now;
        Ok(())
    }

    pub fn ensure_not_finished(&self) -> Result<(), YearError> {
        if self.is_locked() {
            return Err(YearError::Locked {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Dependents are checked in a fixed order: sections, students,
    /// professors, evaluations.
    pub fn check_deletable(&self, counts: &DependentCounts) -> Result<(), YearError> {
        let name = || self.name.clone();
        if counts.sections > 0 {
            return Err(YearError::HasSections {
                name: name(),
                count: counts.sections,
            });
        }
        if counts.students > 0 {
            return Err(YearError::HasStudents {
                name: name(),
                count: counts.students,
            });
        }
        if counts.professors > 0 {
            return Err(YearError::HasProfessors {
                name: name(),
                count: counts.professors,
            });
        }
        if counts.evaluations > 0 {
            return Err(YearError::HasEvaluations {
                name: name(),
                count: counts.evaluations,
            });
        }
        Ok(())
    }

    /// Fails when the update changes any evaluation-type reference after
    /// evaluations were recorded. Resending the stored value is not a change.
    pub fn check_grading_change(
        &self,
        dto: &UpdateSchoolYearDto,
        has_evaluations: bool,
    ) -> Result<(), YearError> {
        if !has_evaluations {
            return Ok(());
        }
        let changes = |requested: Option<EvaluationTypeId>, stored: EvaluationTypeId| {
            requested.is_some_and(|id| id != stored)
        };
        if changes(dto.evaluation_type_secondary, self.evaluation_type_secondary)
            || changes(dto.evaluation_type_primary, self.evaluation_type_primary)
            || changes(dto.evaluation_type_preschool, self.evaluation_type_preschool)
        {
            return Err(YearError::GradingLocked);
        }
        Ok(())
    }

    /// Applies an update that already passed the guards.
    pub fn apply_update(&mut self, dto: UpdateSchoolYearDto, now: DateTime<Utc>) {
        if let Some(name) = dto.name {
            self.name = name;
        }
        if let Some(id) = dto.evaluation_type_secondary {
            self.evaluation_type_secondary = id;
        }
        if let Some(id) = dto.evaluation_type_primary {
            self.evaluation_type_primary = id;
        }
        if let Some(id) = dto.evaluation_type_preschool {
            self.evaluation_type_preschool = id;
        }
        self.updated_at = now;
    }
}

/// Checks that `id` names a catalog entry for `level`.
pub fn check_evaluation_type(
    catalog: &[EvaluationType],
    id: EvaluationTypeId,
    level: SchoolLevel,
) -> Result<(), YearError> {
    match catalog.iter().find(|kind| kind.id == id) {
        Some(kind) if kind.level == level => Ok(()),
        _ => Err(YearError::InvalidEvaluationType {
            reference: id.to_string(),
            level: format!("{:?}", level).to_lowercase(),
        }),
    }
}

/// Adds a freshly created year. The new year always takes the current flag.
pub fn register_new(years: &mut Vec<SchoolYear>, year: SchoolYear) -> &SchoolYear {
    for other in years.iter_mut() {
        other.current = false;
    }
    years.push(year);
    &years[years.len() - 1]
}

/// Starts the draft year `id`. On success it is the only current year.
pub fn start_year(
    years: &mut [SchoolYear],
    id: SchoolYearId,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), YearError> {
    let year = years
        .iter()
        .find(|year| year.id == id)
        .ok_or(YearError::NotFound)?;
    if year.state != YearState::Draft {
        return Err(YearError::NotDraft);
    }
    if let Some(active) = years
        .iter()
        .find(|other| other.id != id && other.state == YearState::Active)
    {
        return Err(YearError::AnotherActive {
            name: active.name.clone(),
        });
    }

    for year in years.iter_mut() {
        if year.id == id {
            year.state = YearState::Active;
            year.current = true;
            year.term = Term::First;
            year.start_date_real = Some(today);
            year.updated_at = now;
        } else if year.current {
            year.current = false;
            year.updated_at = now;
        }
    }
    Ok(())
}

fn default_preschool_type() -> EvaluationTypeId {
    // "Preschool - observation" in the stock catalog
    EvaluationTypeId::from_u128(5)
}

/// DTO for creating a school year.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSchoolYearDto {
    /// Name of the school year (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    pub evaluation_type_secondary: EvaluationTypeId,
    pub evaluation_type_primary: EvaluationTypeId,
    /// Defaults to the preschool observation type
    #[serde(default = "default_preschool_type")]
    pub evaluation_type_preschool: EvaluationTypeId,
}

impl CreateSchoolYearDto {
    pub fn check_references(&self, catalog: &[EvaluationType]) -> Result<(), YearError> {
        check_evaluation_type(catalog, self.evaluation_type_secondary, SchoolLevel::Secondary)?;
        check_evaluation_type(catalog, self.evaluation_type_primary, SchoolLevel::Primary)?;
        check_evaluation_type(catalog, self.evaluation_type_preschool, SchoolLevel::Preschool)
    }
}

/// DTO for updating a school year.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSchoolYearDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub evaluation_type_secondary: Option<EvaluationTypeId>,
    pub evaluation_type_primary: Option<EvaluationTypeId>,
    pub evaluation_type_preschool: Option<EvaluationTypeId>,
}

impl UpdateSchoolYearDto {
    pub fn check_references(&self, catalog: &[EvaluationType]) -> Result<(), YearError> {
        let refs = [
            (self.evaluation_type_secondary, SchoolLevel::Secondary),
            (self.evaluation_type_primary, SchoolLevel::Primary),
            (self.evaluation_type_preschool, SchoolLevel::Preschool),
        ];
        for (id, level) in refs {
            if let Some(id) = id {
                check_evaluation_type(catalog, id, level)?;
            }
        }
        Ok(())
    }
}

/// Query parameters for listing school years.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SchoolYearFilterParams {
    /// Filter by lifecycle state
    pub state: Option<YearState>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// School year with its dependent counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolYearWithStats {
    #[serde(flatten)]
    pub year: SchoolYear,
    pub term_display: String,
    pub is_locked: bool,
    pub section_count: usize,
    pub student_count: usize,
    pub professor_count: usize,
    pub evaluation_count: usize,
}

impl SchoolYearWithStats {
    pub fn new(year: SchoolYear, counts: DependentCounts) -> Self {
        Self {
            term_display: year.term_display().to_string(),
            is_locked: year.is_locked(),
            section_count: counts.sections,
            student_count: counts.students,
            professor_count: counts.professors,
            evaluation_count: counts.evaluations,
            year,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedSchoolYearsResponse {
    pub data: Vec<SchoolYearWithStats>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    fn year(name: &str) -> SchoolYear {
        SchoolYear::new(
            CreateSchoolYearDto {
                name: name.to_string(),
                evaluation_type_secondary: EvaluationTypeId::from_u128(1),
                evaluation_type_primary: EvaluationTypeId::from_u128(3),
                evaluation_type_preschool: EvaluationTypeId::from_u128(5),
            },
            Utc::now(),
        )
    }

    fn active_in(term: Term) -> SchoolYear {
        let mut y = year("2025-2026");
        y.state = YearState::Active;
        y.term = term;
        y
    }

    fn assert_invariants(years: &[SchoolYear]) {
        assert!(years.iter().filter(|y| y.current).count() <= 1);
        assert!(years.iter().filter(|y| y.state == YearState::Active).count() <= 1);
    }

    #[test]
    fn test_register_new_steals_current() {
        let mut years = Vec::new();
        register_new(&mut years, year("2024-2025"));
        let second = register_new(&mut years, year("2025-2026")).id;

        assert_invariants(&years);
        assert!(years.iter().find(|y| y.id == second).unwrap().current);
        assert!(!years[0].current);
    }

    #[test]
    fn test_start_sets_active_term_and_date() {
        let mut years = Vec::new();
        let old = register_new(&mut years, year("2024-2025")).id;
        let new = register_new(&mut years, year("2025-2026")).id;
        years[0].current = true;

        start_year(&mut years, new, today(), Utc::now()).unwrap();

        let started = years.iter().find(|y| y.id == new).unwrap();
        assert_eq!(started.state, YearState::Active);
        assert_eq!(started.term, Term::First);
        assert_eq!(started.start_date_real, Some(today()));
        assert!(started.current);
        assert!(!years.iter().find(|y| y.id == old).unwrap().current);
        assert_invariants(&years);
    }

    #[test]
    fn test_start_fails_when_another_year_is_active() {
        let mut years = Vec::new();
        let first = register_new(&mut years, year("2024-2025")).id;
        let second = register_new(&mut years, year("2025-2026")).id;
        start_year(&mut years, first, today(), Utc::now()).unwrap();
        let before = years.clone();

        let err = start_year(&mut years, second, today(), Utc::now()).unwrap_err();

        assert_eq!(
            err,
            YearError::AnotherActive {
                name: "2024-2025".to_string()
            }
        );
        assert_eq!(years, before);
    }

    #[test]
    fn test_start_requires_draft() {
        let mut years = vec![active_in(Term::Second)];
        let id = years[0].id;
        assert_eq!(
            start_year(&mut years, id, today(), Utc::now()),
            Err(YearError::NotDraft)
        );
        assert_eq!(
            start_year(&mut years, SchoolYearId::new(), today(), Utc::now()),
            Err(YearError::NotFound)
        );
    }

    #[test]
    fn test_term_advances_one_to_three_only() {
        let mut y = active_in(Term::First);
        assert_eq!(y.advance_term(Utc::now()), Ok(Term::Second));
        assert_eq!(y.advance_term(Utc::now()), Ok(Term::Third));
        assert_eq!(y.advance_term(Utc::now()), Err(YearError::AlreadyFinalTerm));
        assert_eq!(y.term, Term::Third);

        let mut draft = year("2026-2027");
        assert_eq!(
            draft.advance_term(Utc::now()),
            Err(YearError::NotActiveForTermChange)
        );
    }

    #[test]
    fn test_finish_requires_third_term() {
        for term in [Term::First, Term::Second] {
            let mut y = active_in(term);
            assert_eq!(
                y.finish(today(), Utc::now()),
                Err(YearError::TermNotFinal { term })
            );
            assert_eq!(y.state, YearState::Active);
        }

        let mut y = active_in(Term::Third);
        y.current = true;
        y.finish(today(), Utc::now()).unwrap();
        assert_eq!(y.state, YearState::Finished);
        assert!(!y.current);
        assert_eq!(y.end_date_real, Some(today()));
        assert!(y.is_locked());
        assert_eq!(y.term_display(), "Finished");
    }

    #[test]
    fn test_finish_requires_active() {
        let mut y = year("2025-2026");
        assert_eq!(
            y.finish(today(), Utc::now()),
            Err(YearError::NotActiveForFinish)
        );
    }

    #[test]
    fn test_delete_checks_each_dependent() {
        let y = year("2025-2026");
        assert!(y.check_deletable(&DependentCounts::default()).is_ok());

        let err = y
            .check_deletable(&DependentCounts {
                sections: 0,
                students: 0,
                professors: 2,
                evaluations: 5,
            })
            .unwrap_err();
        assert_eq!(
            err,
            YearError::HasProfessors {
                name: "2025-2026".to_string(),
                count: 2
            }
        );

        let err = y
            .check_deletable(&DependentCounts {
                evaluations: 1,
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("1 recorded evaluation(s)"));
    }

    #[test]
    fn test_grading_guard_checks_all_three_references() {
        let y = year("2025-2026");
        let preschool_change = UpdateSchoolYearDto {
            evaluation_type_preschool: Some(EvaluationTypeId::from_u128(6)),
            ..Default::default()
        };
        assert_eq!(
            y.check_grading_change(&preschool_change, true),
            Err(YearError::GradingLocked)
        );
        assert!(y.check_grading_change(&preschool_change, false).is_ok());

        let same_values = UpdateSchoolYearDto {
            name: Some("Renamed".to_string()),
            evaluation_type_secondary: Some(y.evaluation_type_secondary),
            ..Default::default()
        };
        assert!(y.check_grading_change(&same_values, true).is_ok());
    }

    #[test]
    fn test_grading_config_resolves_catalog() {
        let catalog = EvaluationType::default_catalog();
        let mut y = year("2025-2026");
        let config = y.grading_config(&catalog);
        assert_eq!(config.secondary, GradingScale::Twenty);
        assert_eq!(config.primary, GradingScale::Literal);
        assert_eq!(config.preschool, GradingScale::Observation);

        y.evaluation_type_primary = EvaluationTypeId::new();
        assert_eq!(y.grading_config(&catalog).primary, GradingScale::Twenty);
    }

    #[test]
    fn test_references_must_match_level() {
        let catalog = EvaluationType::default_catalog();
        let dto = CreateSchoolYearDto {
            name: "2025-2026".to_string(),
            // primary literal used for secondary
            evaluation_type_secondary: EvaluationTypeId::from_u128(3),
            evaluation_type_primary: EvaluationTypeId::from_u128(3),
            evaluation_type_preschool: EvaluationTypeId::from_u128(5),
        };
        assert!(matches!(
            dto.check_references(&catalog),
            Err(YearError::InvalidEvaluationType { .. })
        ));
    }

    #[test]
    fn test_create_dto_validation() {
        let dto = CreateSchoolYearDto {
            name: String::new(),
            evaluation_type_secondary: EvaluationTypeId::from_u128(1),
            evaluation_type_primary: EvaluationTypeId::from_u128(3),
            evaluation_type_preschool: EvaluationTypeId::from_u128(5),
        };
        assert!(dto.validate().is_err());

        let long = CreateSchoolYearDto {
            name: "x".repeat(101),
            ..dto.clone()
        };
        assert!(long.validate().is_err());

        let ok = CreateSchoolYearDto {
            name: "2025-2026".to_string(),
            ..dto
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_preschool_reference_defaults_to_observation() {
        let dto: CreateSchoolYearDto = serde_json::from_value(serde_json::json!({
            "name": "2025-2026",
            "evaluation_type_secondary": EvaluationTypeId::from_u128(1),
            "evaluation_type_primary": EvaluationTypeId::from_u128(3),
        }))
        .unwrap();
        assert_eq!(dto.evaluation_type_preschool, EvaluationTypeId::from_u128(5));
    }

    #[test]
    fn test_term_display() {
        assert_eq!(year("2025-2026").term_display(), "Not started");
        assert_eq!(active_in(Term::Second).term_display(), "Second term");
    }
}
