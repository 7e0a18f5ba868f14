//! Snapshot of everything recorded under one school year.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::enrollments::StudentEnrollment;
use crate::evaluations::{Evaluation, EvaluationScore};
use crate::ids::{EnrollmentId, EvaluationId, ProfessorId, SectionId, SubjectId};
use crate::professors::{Professor, Subject};
use crate::sections::{MentionSection, Section};

/// Dependent records of a year, replaced wholesale on sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct YearRecords {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub mention_sections: Vec<MentionSection>,
    #[serde(default)]
    pub enrollments: Vec<StudentEnrollment>,
    #[serde(default)]
    pub professors: Vec<Professor>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
    #[serde(default)]
    pub scores: Vec<EvaluationScore>,
}

/// Number of records that keep a year from being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DependentCounts {
    pub sections: usize,
    pub students: usize,
    pub professors: usize,
    pub evaluations: usize,
}

impl YearRecords {
    pub fn dependent_counts(&self) -> DependentCounts {
        DependentCounts {
            sections: self.sections.len(),
            students: self.enrollments.len(),
            professors: self.professors.len(),
            evaluations: self.evaluations.len(),
        }
    }

    /// Records across every collection.
    pub fn total_records(&self) -> usize {
        self.sections.len()
            + self.mention_sections.len()
            + self.enrollments.len()
            + self.professors.len()
            + self.subjects.len()
            + self.evaluations.len()
            + self.scores.len()
    }

    pub fn has_evaluations(&self) -> bool {
        !self.evaluations.is_empty()
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn professor(&self, id: ProfessorId) -> Option<&Professor> {
        self.professors.iter().find(|professor| professor.id == id)
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub fn enrollment(&self, id: EnrollmentId) -> Option<&StudentEnrollment> {
        self.enrollments.iter().find(|enrollment| enrollment.id == id)
    }

    pub fn evaluation(&self, id: EvaluationId) -> Option<&Evaluation> {
        self.evaluations.iter().find(|evaluation| evaluation.id == id)
    }

    pub fn section_name(&self, id: SectionId) -> String {
        self.section(id)
            .map(|section| section.name.clone())
            .unwrap_or_default()
    }

    pub fn professor_name(&self, id: ProfessorId) -> String {
        self.professor(id)
            .map(|professor| professor.name.clone())
            .unwrap_or_default()
    }

    pub fn subject_name(&self, id: SubjectId) -> String {
        self.subject(id)
            .map(|subject| subject.name.clone())
            .unwrap_or_default()
    }
}
