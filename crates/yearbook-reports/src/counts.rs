//! Headline counters and distributions.

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;
use yearbook_models::{Level, SchoolLevel, YearRecords};

use crate::partition::LevelBuckets;

/// Counters shown on the dashboard header cards.
///
/// Approval here always reads the general performance summary, including
/// for technical students.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardCounts {
    pub total_students: usize,
    pub approved_students: usize,
    pub total_sections: usize,
    pub total_professors: usize,

    pub students_preschool: usize,
    pub students_primary: usize,
    pub students_secondary_general: usize,
    pub students_secondary_technical: usize,

    pub approved_preschool: usize,
    pub approved_primary: usize,
    pub approved_secondary_general: usize,
    pub approved_secondary_technical: usize,

    pub sections_preschool: usize,
    pub sections_primary: usize,
    pub sections_secondary: usize,

    /// Distinct subjects across secondary sections
    pub subjects_secondary: usize,
    /// Distinct professors across primary sections
    pub professors_primary: usize,
    /// Distinct professors across preschool sections
    pub professors_preschool: usize,
    /// Active mention sections
    pub active_mentions: usize,
}

/// Series for the students-per-level pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentsDistribution {
    pub labels: Vec<String>,
    /// Preschool, primary, general secondary, technical secondary
    pub data: Vec<usize>,
    pub total: usize,
}

/// Series for the sections-per-level chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SectionsDistribution {
    pub labels: Vec<String>,
    /// Preschool, primary and secondary sections, then active mention sections
    pub data: Vec<usize>,
    pub total: usize,
}

fn approved(students: &[&yearbook_models::StudentEnrollment]) -> usize {
    students.iter().filter(|s| s.is_approved()).count()
}

pub fn dashboard_counts(records: &YearRecords, buckets: &LevelBuckets<'_>) -> DashboardCounts {
    let sections_of = |kind: SchoolLevel| records.sections.iter().filter(move |s| s.kind == kind);

    let subjects_secondary: HashSet<_> = sections_of(SchoolLevel::Secondary)
        .flat_map(|s| s.subject_ids.iter().copied())
        .collect();
    let professors_primary: HashSet<_> = sections_of(SchoolLevel::Primary)
        .flat_map(|s| s.professor_ids.iter().copied())
        .collect();
    let professors_preschool: HashSet<_> = sections_of(SchoolLevel::Preschool)
        .flat_map(|s| s.professor_ids.iter().copied())
        .collect();

    DashboardCounts {
        total_students: buckets.total(),
        approved_students: buckets.all().filter(|s| s.is_approved()).count(),
        total_sections: records.sections.len(),
        total_professors: records.professors.len(),

        students_preschool: buckets.preschool.len(),
        students_primary: buckets.primary.len(),
        students_secondary_general: buckets.secondary_general.len(),
        students_secondary_technical: buckets.secondary_technical.len(),

        approved_preschool: approved(&buckets.preschool),
        approved_primary: approved(&buckets.primary),
        approved_secondary_general: approved(&buckets.secondary_general),
        approved_secondary_technical: approved(&buckets.secondary_technical),

        sections_preschool: sections_of(SchoolLevel::Preschool).count(),
        sections_primary: sections_of(SchoolLevel::Primary).count(),
        sections_secondary: sections_of(SchoolLevel::Secondary).count(),

        subjects_secondary: subjects_secondary.len(),
        professors_primary: professors_primary.len(),
        professors_preschool: professors_preschool.len(),
        active_mentions: records.mention_sections.iter().filter(|m| m.active).count(),
    }
}

pub fn students_distribution(buckets: &LevelBuckets<'_>) -> StudentsDistribution {
    StudentsDistribution {
        labels: Level::ALL.iter().map(|l| l.label().to_string()).collect(),
        data: buckets.iter().map(|(_, students)| students.len()).collect(),
        total: buckets.total(),
    }
}

pub fn sections_distribution(records: &YearRecords) -> SectionsDistribution {
    let count = |kind: SchoolLevel| records.sections.iter().filter(|s| s.kind == kind).count();
    let data = vec![
        count(SchoolLevel::Preschool),
        count(SchoolLevel::Primary),
        count(SchoolLevel::Secondary),
        records.mention_sections.iter().filter(|m| m.active).count(),
    ];

    SectionsDistribution {
        labels: Level::ALL.iter().map(|l| l.label().to_string()).collect(),
        total: data.iter().sum(),
        data,
    }
}
