//! Sections and technical-mention sections.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::enrollments::SchoolLevel;
use crate::ids::{MentionId, MentionSectionId, ProfessorId, SectionId, SubjectId};

/// Aggregated results of the students in a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SectionAverageStats {
    pub total_students: u32,
    pub approved_students: u32,
    pub failed_students: u32,
    pub general_average: f64,
}

/// Aggregated results of one subject inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubjectAverageStats {
    pub subject_id: SubjectId,
    pub total_students: u32,
    pub approved_students: u32,
    pub failed_students: u32,
    pub average: f64,
}

/// A class group of one school level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SchoolLevel,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub professor_ids: Vec<ProfessorId>,
    #[serde(default)]
    pub average_stats: Option<SectionAverageStats>,
    /// Per-subject results, only filled for secondary sections
    #[serde(default)]
    pub subject_stats: Vec<SubjectAverageStats>,
}

impl Section {
    pub fn general_average(&self) -> f64 {
        self.average_stats
            .as_ref()
            .map_or(0.0, |stats| stats.general_average)
    }

    /// Has stats with at least one student.
    pub fn has_students(&self) -> bool {
        self.average_stats
            .as_ref()
            .is_some_and(|stats| stats.total_students > 0)
    }
}

/// Section grouping of a technical mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MentionSection {
    pub id: MentionSectionId,
    pub mention_id: MentionId,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub average_stats: Option<SectionAverageStats>,
}

fn default_true() -> bool {
    true
}

impl MentionSection {
    pub fn general_average(&self) -> f64 {
        self.average_stats
            .as_ref()
            .map_or(0.0, |stats| stats.general_average)
    }

    pub fn has_students(&self) -> bool {
        self.average_stats
            .as_ref()
            .is_some_and(|stats| stats.total_students > 0)
    }
}
