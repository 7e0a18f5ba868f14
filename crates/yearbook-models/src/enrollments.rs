//! Student enrollment records and their derived performance summaries.
//!
//! Summaries are computed upstream (per student, from evaluation scores) and
//! arrive here already materialized. A student without a summary simply has
//! `None`; readers treat that as "failed, average zero".

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::grading::Grade;
use crate::ids::{EnrollmentId, MentionId, SectionId, StudentId, SubjectId};

/// School level of an enrollment, section, evaluation or evaluation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SchoolLevel {
    #[serde(rename = "pre")]
    Preschool,
    #[serde(rename = "primary")]
    Primary,
    #[serde(rename = "secondary")]
    Secondary,
}

/// Reporting bucket. Secondary students split on whether they are enrolled
/// in a technical mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[serde(rename = "pre")]
    Preschool,
    Primary,
    SecondaryGeneral,
    SecondaryTechnical,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Preschool,
        Level::Primary,
        Level::SecondaryGeneral,
        Level::SecondaryTechnical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Level::Preschool => "Preschool",
            Level::Primary => "Primary",
            Level::SecondaryGeneral => "General Secondary",
            Level::SecondaryTechnical => "Technical Secondary",
        }
    }

    pub fn school_level(self) -> SchoolLevel {
        match self {
            Level::Preschool => SchoolLevel::Preschool,
            Level::Primary => SchoolLevel::Primary,
            Level::SecondaryGeneral | Level::SecondaryTechnical => SchoolLevel::Secondary,
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" | "preschool" => Ok(Level::Preschool),
            "primary" => Ok(Level::Primary),
            "secondary_general" => Ok(Level::SecondaryGeneral),
            "secondary_technical" => Ok(Level::SecondaryTechnical),
            other => Err(format!("Unknown level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    #[default]
    Draft,
    Done,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MentionState {
    #[default]
    Draft,
    Enrolled,
}

/// Pass/fail verdict of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Approve,
    #[default]
    Failed,
}

impl Outcome {
    pub fn from_passed(passed: bool) -> Self {
        if passed { Outcome::Approve } else { Outcome::Failed }
    }

    pub fn is_approve(self) -> bool {
        self == Outcome::Approve
    }
}

/// A student's overall result, either numeric or literal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Average {
    Numeric { value: f64 },
    Literal { grade: Grade },
}

impl Average {
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Average::Numeric { value } => Some(*value),
            Average::Literal { .. } => None,
        }
    }

    pub fn grade(&self) -> Option<Grade> {
        match self {
            Average::Literal { grade } => Some(*grade),
            Average::Numeric { .. } => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Average::Literal { .. })
    }

    /// Value on the 20-point scale used to rank students. Letters map
    /// through [`Grade::points`].
    pub fn ranking_value(&self) -> f64 {
        match self {
            Average::Numeric { value } => *value,
            Average::Literal { grade } => grade.points(),
        }
    }
}

/// General performance summary across all of a student's subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceSummary {
    pub total_subjects: u32,
    pub subjects_approved: u32,
    pub subjects_failed: u32,
    pub average: Average,
    pub state: Outcome,
}

/// Result in one technical-mention subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MentionSubjectScore {
    pub subject_id: SubjectId,
    pub average: f64,
    pub state: Outcome,
}

/// Performance restricted to the subjects of the student's mention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MentionScoreSummary {
    #[serde(default)]
    pub subjects: Vec<MentionSubjectScore>,
    pub general_average: f64,
    pub state: Outcome,
}

impl MentionScoreSummary {
    pub fn has_subjects(&self) -> bool {
        !self.subjects.is_empty()
    }
}

/// One student's enrollment in a school year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentEnrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub student_name: String,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    #[serde(rename = "type")]
    pub kind: SchoolLevel,
    #[serde(default)]
    pub state: EnrollmentState,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub mention_id: Option<MentionId>,
    #[serde(default)]
    pub mention_name: Option<String>,
    #[serde(default)]
    pub mention_state: MentionState,
    #[serde(default)]
    pub performance: Option<PerformanceSummary>,
    #[serde(default)]
    pub mention_scores: Option<MentionScoreSummary>,
}

impl StudentEnrollment {
    /// Counted by the dashboard: current and enrollment completed.
    pub fn is_active(&self) -> bool {
        self.current && self.state == EnrollmentState::Done
    }

    /// Reporting bucket, regardless of activity.
    pub fn level(&self) -> Level {
        match self.kind {
            SchoolLevel::Preschool => Level::Preschool,
            SchoolLevel::Primary => Level::Primary,
            SchoolLevel::Secondary if self.mention_state == MentionState::Enrolled => {
                Level::SecondaryTechnical
            }
            SchoolLevel::Secondary => Level::SecondaryGeneral,
        }
    }

    /// General summary says "approve".
    pub fn is_approved(&self) -> bool {
        self.performance
            .as_ref()
            .is_some_and(|perf| perf.state.is_approve())
    }

    /// Mention summary when it lists subjects, otherwise `None`.
    pub fn mention_summary(&self) -> Option<&MentionScoreSummary> {
        self.mention_scores
            .as_ref()
            .filter(|summary| summary.has_subjects())
    }

    /// Approval judged on the mention summary, falling back to the general
    /// one when no mention subjects are recorded.
    pub fn is_mention_approved(&self) -> bool {
        match self.mention_summary() {
            Some(summary) => summary.state.is_approve(),
            None => self.is_approved(),
        }
    }
}
