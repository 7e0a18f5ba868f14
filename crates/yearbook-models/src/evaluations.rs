//! Evaluations and the individual scores recorded against them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::enrollments::SchoolLevel;
use crate::grading::Grade;
use crate::ids::{EnrollmentId, EvaluationId, EvaluationScoreId, ProfessorId, SectionId, SubjectId};

/// How far grading of an evaluation has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationState {
    #[default]
    Draft,
    /// Some students graded
    Partial,
    /// Every student graded
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub state: EvaluationState,
    #[serde(rename = "type")]
    pub kind: SchoolLevel,
    pub professor_id: ProfessorId,
    pub section_id: SectionId,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub score_average: f64,
}

/// One student's result in one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvaluationScore {
    pub id: EvaluationScoreId,
    pub evaluation_id: EvaluationId,
    #[serde(default)]
    pub enrollment_id: Option<EnrollmentId>,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    /// Points on the 20-point scale
    #[serde(default)]
    pub points_20: f64,
    #[serde(default)]
    pub literal: Option<Grade>,
}

impl EvaluationScore {
    /// Value on the 20-point scale. In literal mode a letter maps through
    /// [`Grade::points`] and a missing letter counts as zero.
    pub fn scored_value(&self, literal_mode: bool) -> f64 {
        if literal_mode {
            self.literal.map_or(0.0, Grade::points)
        } else {
            self.points_20
        }
    }
}
