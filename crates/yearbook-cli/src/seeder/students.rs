//! Student enrollments with summaries derived from drawn subject results.
//!
//! Every summary is computed from the per-subject values drawn for the
//! student, so counts, averages and states always agree with each other.

use fake::Fake;
use fake::faker::name::en::Name;
use rayon::prelude::*;
use yearbook_core::math::{mean, round2};
use yearbook_models::ids::{EnrollmentId, StudentId, SubjectId};
use yearbook_models::{
    Average, EnrollmentState, Grade, GradingConfig, GradingScale, MentionScoreSummary,
    MentionState, MentionSubjectScore, Outcome, PerformanceSummary, SchoolLevel, Section,
    StudentEnrollment,
};

use super::structure::MentionPlan;

/// Subjects assumed for levels whose sections list none.
const UNLISTED_SUBJECTS: usize = 6;

/// A student plus the values the evaluation scores are drawn around.
#[derive(Debug, Clone)]
pub struct GeneratedStudent {
    pub enrollment: StudentEnrollment,
    /// Result on the 20-point scale
    pub baseline: f64,
    /// Literal grade, for literal-graded levels
    pub grade: Option<Grade>,
    /// 20-point result per listed subject
    pub subject_points: Vec<(SubjectId, f64)>,
}

fn draw_points() -> f64 {
    round2((5.0..19.5).fake::<f64>())
}

fn draw_grade() -> Grade {
    // Skewed towards passing letters
    const BAG: [Grade; 8] = [
        Grade::A,
        Grade::B,
        Grade::B,
        Grade::C,
        Grade::C,
        Grade::C,
        Grade::D,
        Grade::E,
    ];
    BAG[(0..BAG.len()).fake::<usize>()]
}

/// Converts a 20-point value to the scale of `scale`.
fn on_scale(points: f64, scale: GradingScale) -> f64 {
    match scale {
        GradingScale::Twenty => points,
        _ => round2(points * 5.0),
    }
}

fn numeric_summary(points: &[f64], scale: GradingScale) -> PerformanceSummary {
    let failed = points.iter().filter(|p| **p < 10.0).count() as u32;
    let total = points.len() as u32;
    let average = on_scale(mean(points), scale);
    PerformanceSummary {
        total_subjects: total,
        subjects_approved: total - failed,
        subjects_failed: failed,
        average: Average::Numeric { value: average },
        state: Outcome::from_passed(average >= scale.pass_mark() && failed == 0),
    }
}

fn literal_summary(grades: &[Grade]) -> PerformanceSummary {
    let weights: Vec<f64> = grades.iter().map(|g| g.weight()).collect();
    let grade = Grade::from_weight(mean(&weights));
    let failed = grades.iter().filter(|g| !g.is_passing()).count() as u32;
    let total = grades.len() as u32;
    PerformanceSummary {
        total_subjects: total,
        subjects_approved: total - failed,
        subjects_failed: failed,
        average: Average::Literal { grade },
        state: Outcome::from_passed(grade.is_passing()),
    }
}

fn mention_summary(mention: &MentionPlan) -> MentionScoreSummary {
    let subjects: Vec<MentionSubjectScore> = mention
        .subject_ids
        .iter()
        .map(|id| {
            let average = draw_points();
            MentionSubjectScore {
                subject_id: *id,
                average,
                state: Outcome::from_passed(average >= 10.0),
            }
        })
        .collect();
    let averages: Vec<f64> = subjects.iter().map(|s| s.average).collect();
    MentionScoreSummary {
        general_average: mean(&averages),
        state: Outcome::from_passed(subjects.iter().all(|s| s.state.is_approve())),
        subjects,
    }
}

fn generate_student(
    section: &Section,
    scale: GradingScale,
    mention: Option<&MentionPlan>,
    withdrawn: bool,
) -> GeneratedStudent {
    let subject_points: Vec<(SubjectId, f64)> = section
        .subject_ids
        .iter()
        .map(|id| (*id, draw_points()))
        .collect();

    let (performance, baseline, grade) = if scale.is_literal() {
        let grades: Vec<Grade> = (0..UNLISTED_SUBJECTS).map(|_| draw_grade()).collect();
        let summary = literal_summary(&grades);
        let grade = summary.average.grade();
        (summary, grade.map_or(0.0, Grade::points), grade)
    } else {
        let points: Vec<f64> = if subject_points.is_empty() {
            (0..UNLISTED_SUBJECTS).map(|_| draw_points()).collect()
        } else {
            subject_points.iter().map(|(_, p)| *p).collect()
        };
        (numeric_summary(&points, scale), mean(&points), None)
    };

    let enrollment = StudentEnrollment {
        id: EnrollmentId::new(),
        student_id: StudentId::new(),
        student_name: Name().fake(),
        section_id: Some(section.id),
        kind: section.kind,
        state: if withdrawn {
            EnrollmentState::Cancel
        } else {
            EnrollmentState::Done
        },
        current: true,
        mention_id: mention.map(|m| m.id),
        mention_name: mention.map(|m| m.name.clone()),
        mention_state: if mention.is_some() {
            MentionState::Enrolled
        } else {
            MentionState::Draft
        },
        performance: Some(performance),
        mention_scores: mention.map(mention_summary),
    };

    GeneratedStudent {
        enrollment,
        baseline,
        grade,
        subject_points,
    }
}

/// Generates `per_section` students for every section in parallel.
///
/// One in `mention_ratio` secondary students joins a mention (cycling
/// through `mentions`). The last student of each section is cancelled so
/// inactive enrollments exist too.
pub fn generate_students(
    sections: &[Section],
    per_section: usize,
    mentions: &[MentionPlan],
    mention_ratio: usize,
    grading: &GradingConfig,
) -> Vec<GeneratedStudent> {
    sections
        .par_iter()
        .flat_map(|section| {
            let scale = grading.for_school_level(section.kind);
            (0..per_section)
                .map(|i| {
                    let mention = match section.kind {
                        SchoolLevel::Secondary
                            if !mentions.is_empty()
                                && mention_ratio > 0
                                && i % mention_ratio == 0 =>
                        {
                            Some(&mentions[(i / mention_ratio) % mentions.len()])
                        }
                        _ => None,
                    };
                    let withdrawn = per_section > 1 && i + 1 == per_section;
                    generate_student(section, scale, mention, withdrawn)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
