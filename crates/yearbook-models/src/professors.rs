use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{ProfessorId, SectionId, SubjectId};

/// Professor assigned to a school year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Professor {
    pub id: ProfessorId,
    pub name: String,
    /// Sections the professor teaches in
    #[serde(default)]
    pub section_ids: Vec<SectionId>,
    /// Subjects the professor teaches
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
}

/// Subject catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}
