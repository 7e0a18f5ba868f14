//! Rankings: top students, best sections, difficult subjects, and the
//! approval-rate summary.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use yearbook_core::math::{mean, percentage, round2};
use yearbook_models::ids::SubjectId;
use yearbook_models::{
    Grade, GradingScale, Level, Outcome, SchoolLevel, SectionAverageStats, StudentEnrollment,
    YearRecords,
};

use crate::partition::LevelBuckets;

/// How many students each ranking keeps.
pub const TOP_N: usize = 3;

/// How many subjects the difficulty ranking keeps.
pub const DIFFICULT_SUBJECTS_LIMIT: usize = 10;

/// Sorts by `key` descending (stable), keeps the first [`TOP_N`], then drops
/// entries whose key is zero, which means "not graded yet".
pub fn select_top<T>(mut items: Vec<T>, key: impl Fn(&T) -> f64) -> Vec<T> {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(TOP_N);
    items.retain(|item| key(item) != 0.0);
    items
}

/// A ranked student as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopStudent {
    pub student_id: Uuid,
    pub enrollment_id: Uuid,
    pub student_name: String,
    /// Section name, or mention name for technical students
    pub section: String,
    /// Ranking value on the 20-point scale (letters map A=18 .. E=4)
    pub average: f64,
    pub literal_average: Option<Grade>,
    /// Average formatted for display ("15/20" or "B")
    pub display: String,
    pub state: Outcome,
    pub use_literal: bool,
}

impl TopStudent {
    /// Ranks on the general summary.
    pub fn general(student: &StudentEnrollment, section: String, scale: GradingScale) -> Self {
        let (average, literal, state) = match &student.performance {
            Some(perf) => (perf.average.ranking_value(), perf.average.grade(), perf.state),
            None => (0.0, None, Outcome::Failed),
        };
        let display = match literal {
            Some(grade) => format!("{:?}", grade),
            None => format!("{}{}", round2(average), scale.suffix()),
        };

        Self {
            student_id: student.student_id.into_inner(),
            enrollment_id: student.id.into_inner(),
            student_name: student.student_name.clone(),
            section,
            average,
            literal_average: literal,
            display,
            use_literal: literal.is_some(),
            state,
        }
    }

    /// Ranks on the mention summary, falling back to the general one when
    /// it lists no subjects.
    pub fn technical(student: &StudentEnrollment, scale: GradingScale) -> Self {
        let section = student.mention_name.clone().unwrap_or_default();
        match student.mention_summary() {
            Some(mention) => Self {
                student_id: student.student_id.into_inner(),
                enrollment_id: student.id.into_inner(),
                student_name: student.student_name.clone(),
                section,
                average: mention.general_average,
                literal_average: None,
                display: format!("{}{}", round2(mention.general_average), scale.suffix()),
                state: mention.state,
                use_literal: false,
            },
            None => Self::general(student, section, scale),
        }
    }
}

fn rank(students: Vec<TopStudent>) -> Vec<TopStudent> {
    select_top(students, |s| s.average)
}

/// Top three students of the year per bucket. Preschool is not ranked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct TopStudentsOfYear {
    pub top_primary: Vec<TopStudent>,
    pub top_secondary_general: Vec<TopStudent>,
    pub top_technical: Vec<TopStudent>,
}

pub fn top_students_of_year(
    records: &YearRecords,
    buckets: &LevelBuckets<'_>,
    scale_for: impl Fn(Level) -> GradingScale,
) -> TopStudentsOfYear {
    let general = |level: Level| {
        let scale = scale_for(level);
        let students = buckets
            .get(level)
            .iter()
            .map(|s| {
                let section = s.section_id.map(|id| records.section_name(id)).unwrap_or_default();
                TopStudent::general(s, section, scale)
            })
            .collect();
        rank(students)
    };

    let technical_scale = scale_for(Level::SecondaryTechnical);
    let technical = buckets
        .secondary_technical
        .iter()
        .map(|s| TopStudent::technical(s, technical_scale))
        .collect();

    TopStudentsOfYear {
        top_primary: general(Level::Primary),
        top_secondary_general: general(Level::SecondaryGeneral),
        top_technical: rank(technical),
    }
}

/// Ranked students of one section or mention.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GroupTop {
    /// Section id, or mention id for the technical bucket
    pub group_id: Option<Uuid>,
    pub group_name: String,
    pub top_3: Vec<TopStudent>,
}

/// Top three per group, groups sorted by name. Groups appear in first-seen
/// order before sorting, so equal names keep that order.
pub fn top_by_group(entries: Vec<(Option<Uuid>, String, TopStudent)>) -> Vec<GroupTop> {
    let mut order: Vec<(Option<Uuid>, String)> = Vec::new();
    let mut grouped: HashMap<Option<Uuid>, Vec<TopStudent>> = HashMap::new();

    for (id, name, student) in entries {
        let bucket = grouped.entry(id).or_default();
        if bucket.is_empty() {
            order.push((id, name));
        }
        bucket.push(student);
    }

    let mut groups: Vec<GroupTop> = order
        .into_iter()
        .map(|(id, name)| GroupTop {
            group_id: id,
            group_name: name,
            top_3: rank(grouped.remove(&id).unwrap_or_default()),
        })
        .collect();
    groups.sort_by(|a, b| a.group_name.cmp(&b.group_name));
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    Primary,
    Secondary,
    Technical,
}

impl ComparisonKind {
    pub fn label(self) -> &'static str {
        match self {
            ComparisonKind::Primary => "Primary",
            ComparisonKind::Secondary => "General Secondary",
            ComparisonKind::Technical => "Technical Secondary",
        }
    }
}

/// Best section of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SectionComparison {
    pub section_id: Uuid,
    pub section_name: String,
    #[serde(rename = "type")]
    pub kind: ComparisonKind,
    pub type_name: String,
    pub average: f64,
    pub total_students: u32,
    pub approved_students: u32,
    pub failed_students: u32,
    pub approval_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SectionsComparison {
    pub sections: Vec<SectionComparison>,
}

fn comparison(id: Uuid, name: &str, kind: ComparisonKind, stats: &SectionAverageStats) -> SectionComparison {
    SectionComparison {
        section_id: id,
        section_name: name.to_string(),
        kind,
        type_name: kind.label().to_string(),
        average: stats.general_average,
        total_students: stats.total_students,
        approved_students: stats.approved_students,
        failed_students: stats.failed_students,
        approval_rate: percentage(stats.approved_students as usize, stats.total_students as usize),
    }
}

/// Highest-average section per kind: primary, secondary, and active mention
/// sections as technical. Sections without students are ignored.
pub fn best_sections(records: &YearRecords) -> SectionsComparison {
    let mut candidates: Vec<SectionComparison> = Vec::new();

    for section in &records.sections {
        let kind = match section.kind {
            SchoolLevel::Primary => ComparisonKind::Primary,
            SchoolLevel::Secondary => ComparisonKind::Secondary,
            SchoolLevel::Preschool => continue,
        };
        if let Some(stats) = section.average_stats.as_ref().filter(|_| section.has_students()) {
            candidates.push(comparison(section.id.into_inner(), &section.name, kind, stats));
        }
    }
    for mention in records.mention_sections.iter().filter(|m| m.active) {
        if let Some(stats) = mention.average_stats.as_ref().filter(|_| mention.has_students()) {
            candidates.push(comparison(
                mention.id.into_inner(),
                &mention.name,
                ComparisonKind::Technical,
                stats,
            ));
        }
    }

    let sections = [
        ComparisonKind::Primary,
        ComparisonKind::Secondary,
        ComparisonKind::Technical,
    ]
    .into_iter()
    .filter_map(|kind| {
        let mut group: Vec<&SectionComparison> =
            candidates.iter().filter(|c| c.kind == kind).collect();
        group.sort_by(|a, b| b.average.total_cmp(&a.average));
        group.first().map(|best| (*best).clone())
    })
    .collect();

    SectionsComparison { sections }
}

/// Failure statistics of one subject across secondary sections.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DifficultSubject {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub total_students: u32,
    pub failed_students: u32,
    pub approved_students: u32,
    pub failure_rate: f64,
    /// Mean of the per-section averages
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DifficultSubjects {
    pub subjects: Vec<DifficultSubject>,
}

#[derive(Default)]
struct SubjectTally {
    total: u32,
    failed: u32,
    approved: u32,
    average_sum: f64,
    sections: u32,
}

/// Subjects with the highest failure rate, at most
/// [`DIFFICULT_SUBJECTS_LIMIT`].
pub fn difficult_subjects(records: &YearRecords) -> DifficultSubjects {
    let mut order: Vec<SubjectId> = Vec::new();
    let mut tallies: HashMap<SubjectId, SubjectTally> = HashMap::new();

    let secondary = records
        .sections
        .iter()
        .filter(|s| s.kind == SchoolLevel::Secondary);
    for stats in secondary.flat_map(|s| s.subject_stats.iter()) {
        let tally = tallies.entry(stats.subject_id).or_insert_with(|| {
            order.push(stats.subject_id);
            SubjectTally::default()
        });
        tally.total += stats.total_students;
        tally.failed += stats.failed_students;
        tally.approved += stats.approved_students;
        tally.average_sum += stats.average;
        tally.sections += 1;
    }

    let mut subjects: Vec<DifficultSubject> = order
        .into_iter()
        .filter_map(|id| {
            let tally = tallies.get(&id)?;
            if tally.total == 0 {
                return None;
            }
            Some(DifficultSubject {
                subject_id: id.into_inner(),
                subject_name: records.subject_name(id),
                total_students: tally.total,
                failed_students: tally.failed,
                approved_students: tally.approved,
                failure_rate: percentage(tally.failed as usize, tally.total as usize),
                average: round2(tally.average_sum / f64::from(tally.sections)),
            })
        })
        .collect();

    subjects.sort_by(|a, b| b.failure_rate.total_cmp(&a.failure_rate));
    subjects.truncate(DIFFICULT_SUBJECTS_LIMIT);
    DifficultSubjects { subjects }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LevelRate {
    pub name: String,
    pub rate: f64,
    pub count: usize,
}

/// Year approval rate.
///
/// `rate` is the mean of the per-level rates, so every level weighs the
/// same regardless of its size. `total`, `approved` and `failed` are plain
/// counts over every active student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ApprovalRate {
    pub total: usize,
    pub approved: usize,
    pub failed: usize,
    pub rate: f64,
    pub by_level: Vec<LevelRate>,
}

pub fn approval_rate(buckets: &LevelBuckets<'_>) -> ApprovalRate {
    let by_level: Vec<LevelRate> = buckets
        .iter()
        .filter(|(_, students)| !students.is_empty())
        .map(|(level, students)| {
            let approved = students
                .iter()
                .filter(|s| match level {
                    Level::SecondaryTechnical => s.is_mention_approved(),
                    _ => s.is_approved(),
                })
                .count();
            LevelRate {
                name: level.label().to_string(),
                rate: percentage(approved, students.len()),
                count: students.len(),
            }
        })
        .collect();

    let total = buckets.total();
    let approved = buckets.all().filter(|s| s.is_approved()).count();
    let rates: Vec<f64> = by_level.iter().map(|l| l.rate).collect();

    ApprovalRate {
        total,
        approved,
        failed: total - approved,
        rate: mean(&rates),
        by_level,
    }
}
