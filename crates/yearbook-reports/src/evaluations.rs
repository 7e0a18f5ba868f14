use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use yearbook_models::{Evaluation, EvaluationState, SchoolLevel, YearRecords};

/// How many evaluations the recent list keeps.
pub const RECENT_EVALUATIONS_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct EvaluationsByType {
    pub secondary: usize,
    pub primary: usize,
    pub pre: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct EvaluationStats {
    pub total: usize,
    /// Fully graded
    pub qualified: usize,
    pub partial: usize,
    pub draft: usize,
    pub by_type: EvaluationsByType,
}

pub fn evaluation_stats(records: &YearRecords) -> EvaluationStats {
    let evaluations = &records.evaluations;
    let in_state = |state: EvaluationState| evaluations.iter().filter(|e| e.state == state).count();
    let of_type = |kind: SchoolLevel| evaluations.iter().filter(|e| e.kind == kind).count();

    EvaluationStats {
        total: evaluations.len(),
        qualified: in_state(EvaluationState::All),
        partial: in_state(EvaluationState::Partial),
        draft: in_state(EvaluationState::Draft),
        by_type: EvaluationsByType {
            secondary: of_type(SchoolLevel::Secondary),
            primary: of_type(SchoolLevel::Primary),
            pre: of_type(SchoolLevel::Preschool),
        },
    }
}

/// Flattened evaluation row for the recent list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecentEvaluation {
    pub id: Uuid,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub professor: String,
    pub section: String,
    /// Subject name, "N/A" when the evaluation has no subject
    pub subject: String,
    pub state: EvaluationState,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct RecentEvaluations {
    pub evaluations: Vec<RecentEvaluation>,
}

/// Newest first; undated evaluations sort last.
fn by_date_desc(a: &Evaluation, b: &Evaluation) -> Ordering {
    match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn recent_evaluations(records: &YearRecords) -> RecentEvaluations {
    let mut evaluations: Vec<&Evaluation> = records.evaluations.iter().collect();
    evaluations.sort_by(|a, b| by_date_desc(a, b));

    let evaluations = evaluations
        .into_iter()
        .take(RECENT_EVALUATIONS_LIMIT)
        .map(|e| RecentEvaluation {
            id: e.id.into_inner(),
            name: e.name.clone(),
            date: e.date,
            professor: records.professor_name(e.professor_id),
            section: records.section_name(e.section_id),
            subject: e
                .subject_id
                .map(|id| records.subject_name(id))
                .unwrap_or_else(|| "N/A".to_string()),
            state: e.state,
            average: e.score_average,
        })
        .collect();

    RecentEvaluations { evaluations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::evaluation;
    use yearbook_models::ids::{ProfessorId, SectionId};

    fn dated(name: &str, date: Option<(i32, u32, u32)>, state: EvaluationState, kind: SchoolLevel) -> Evaluation {
        let mut e = evaluation(name, kind, ProfessorId::new(), SectionId::new());
        e.date = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        e.state = state;
        e
    }

    #[test]
    fn test_stats_count_states_and_types() {
        let records = YearRecords {
            evaluations: vec![
                dated("a", None, EvaluationState::All, SchoolLevel::Secondary),
                dated("b", None, EvaluationState::All, SchoolLevel::Primary),
                dated("c", None, EvaluationState::Partial, SchoolLevel::Primary),
                dated("d", None, EvaluationState::Draft, SchoolLevel::Preschool),
            ],
            ..Default::default()
        };
        let stats = evaluation_stats(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.qualified, 2);
        assert_eq!(stats.partial, 1);
        assert_eq!(stats.draft, 1);
        assert_eq!(stats.by_type.primary, 2);
        assert_eq!(stats.by_type.pre, 1);
    }

    #[test]
    fn test_recent_sorted_newest_first_with_undated_last() {
        let records = YearRecords {
            evaluations: vec![
                dated("undated", None, EvaluationState::Draft, SchoolLevel::Primary),
                dated("october", Some((2025, 10, 3)), EvaluationState::All, SchoolLevel::Primary),
                dated("november", Some((2025, 11, 20)), EvaluationState::All, SchoolLevel::Primary),
            ],
            ..Default::default()
        };
        let recent = recent_evaluations(&records);
        let names: Vec<&str> = recent.evaluations.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["november", "october", "undated"]);
        assert_eq!(recent.evaluations[0].subject, "N/A");
    }

    #[test]
    fn test_recent_keeps_twenty() {
        let records = YearRecords {
            evaluations: (1..=25)
                .map(|day| dated("e", Some((2025, 10, day)), EvaluationState::All, SchoolLevel::Secondary))
                .collect(),
            ..Default::default()
        };
        let recent = recent_evaluations(&records);
        assert_eq!(recent.evaluations.len(), RECENT_EVALUATIONS_LIMIT);
        assert_eq!(recent.evaluations[0].date, NaiveDate::from_ymd_opt(2025, 10, 25));
    }
}
