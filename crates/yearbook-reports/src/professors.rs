//! Professor workload and per-category score averages.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use yearbook_core::math::mean;
use yearbook_models::ids::{EnrollmentId, EvaluationId, ProfessorId};
use yearbook_models::{EnrollmentState, GradingConfig, Level, StudentEnrollment, YearRecords};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfessorSummary {
    pub professor_id: Uuid,
    pub professor_name: String,
    pub sections_count: usize,
    pub subjects_count: usize,
    pub evaluations_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ProfessorsReport {
    pub professors: Vec<ProfessorSummary>,
    pub total: usize,
}

fn evaluations_by_professor(records: &YearRecords) -> HashMap<ProfessorId, usize> {
    let mut counts = HashMap::new();
    for evaluation in &records.evaluations {
        *counts.entry(evaluation.professor_id).or_insert(0) += 1;
    }
    counts
}

pub fn professor_summary(records: &YearRecords) -> ProfessorsReport {
    let evaluations = evaluations_by_professor(records);
    let professors: Vec<ProfessorSummary> = records
        .professors
        .iter()
        .map(|professor| ProfessorSummary {
            professor_id: professor.id.into_inner(),
            professor_name: professor.name.clone(),
            sections_count: professor.section_ids.len(),
            subjects_count: professor.subject_ids.len(),
            evaluations_count: evaluations.get(&professor.id).copied().unwrap_or(0),
        })
        .collect();

    ProfessorsReport {
        total: professors.len(),
        professors,
    }
}

/// Score count and mean for one student category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct CategoryStat {
    pub count: usize,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct CategoryBreakdown {
    #[serde(rename = "pre")]
    pub preschool: CategoryStat,
    pub primary: CategoryStat,
    pub secondary_general: CategoryStat,
    pub secondary_technical: CategoryStat,
}

impl CategoryBreakdown {
    fn slot(&mut self, level: Level) -> &mut CategoryStat {
        match level {
            Level::Preschool => &mut self.preschool,
            Level::Primary => &mut self.primary,
            Level::SecondaryGeneral => &mut self.secondary_general,
            Level::SecondaryTechnical => &mut self.secondary_technical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfessorDetail {
    pub professor_id: Uuid,
    pub professor_name: String,
    pub total_evaluations: usize,
    pub sections_count: usize,
    pub stats_by_type: CategoryBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ProfessorsDetailedReport {
    pub professors: Vec<ProfessorDetail>,
    pub total: usize,
}

/// Buckets every score of a professor's evaluations by the student's
/// category and averages each bucket.
///
/// Scores whose enrollment is unknown or not done are skipped. Literal
/// levels score letters on the 20-point map; the others use `points_20`.
pub fn professor_detailed_stats(records: &YearRecords, grading: &GradingConfig) -> ProfessorsDetailedReport {
    let evaluation_owner: HashMap<EvaluationId, ProfessorId> = records
        .evaluations
        .iter()
        .map(|e| (e.id, e.professor_id))
        .collect();
    let enrollments: HashMap<EnrollmentId, &StudentEnrollment> =
        records.enrollments.iter().map(|e| (e.id, e)).collect();

    let mut values: HashMap<(ProfessorId, Level), Vec<f64>> = HashMap::new();
    for score in &records.scores {
        let Some(professor) = evaluation_owner.get(&score.evaluation_id) else {
            continue;
        };
        let Some(student) = score
            .enrollment_id
            .and_then(|id| enrollments.get(&id))
            .filter(|s| s.state == EnrollmentState::Done)
        else {
            continue;
        };
        let level = student.level();
        let literal = grading.for_level(level).is_literal();
        values
            .entry((*professor, level))
            .or_default()
            .push(score.scored_value(literal));
    }

    let evaluations = evaluations_by_professor(records);
    let professors: Vec<ProfessorDetail> = records
        .professors
        .iter()
        .map(|professor| {
            let mut stats = CategoryBreakdown::default();
            for level in Level::ALL {
                if let Some(scores) = values.get(&(professor.id, level)) {
                    *stats.slot(level) = CategoryStat {
                        count: scores.len(),
                        average: mean(scores),
                    };
                }
            }
            ProfessorDetail {
                professor_id: professor.id.into_inner(),
                professor_name: professor.name.clone(),
                total_evaluations: evaluations.get(&professor.id).copied().unwrap_or(0),
                sections_count: professor.section_ids.len(),
                stats_by_type: stats,
            }
        })
        .collect();

    ProfessorsDetailedReport {
        total: professors.len(),
        professors,
    }
}
