//! Per-level performance.
//!
//! Two views live here. [`level_performance`] aggregates subject counts
//! and a subject-weighted average for one bucket. [`performance_by_level`]
//! is the overview card with per-student approval and a plain mean.

use serde::Serialize;
use utoipa::ToSchema;
use yearbook_core::math::{mean, percentage, round2};
use yearbook_models::{Grade, GradingScale, Level, Outcome, StudentEnrollment};

use crate::partition::LevelBuckets;

/// Subject-level aggregate of one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LevelPerformance {
    pub level: Level,
    /// Scale configured for the level
    pub evaluation_type: GradingScale,
    pub total_subjects: u32,
    pub subjects_approved: u32,
    pub subjects_failed: u32,
    /// Weighted numeric average. Zero in literal mode.
    pub general_average: f64,
    pub general_state: Outcome,
    pub use_literal: bool,
    pub literal_average: Option<Grade>,
    /// Approved subjects over total subjects
    pub approval_percentage: f64,
}

impl LevelPerformance {
    fn empty(level: Level, scale: GradingScale) -> Self {
        Self {
            level,
            evaluation_type: scale,
            total_subjects: 0,
            subjects_approved: 0,
            subjects_failed: 0,
            general_average: 0.0,
            general_state: Outcome::Failed,
            use_literal: scale.is_literal(),
            literal_average: None,
            approval_percentage: 0.0,
        }
    }

    fn finish_numeric(&mut self, weighted_sum: f64, weight: f64, pass_mark: f64) {
        if weight > 0.0 {
            let average = round2(weighted_sum / weight);
            self.general_average = average;
            self.general_state =
                Outcome::from_passed(average >= pass_mark && self.subjects_failed == 0);
        }
        self.approval_percentage =
            percentage(self.subjects_approved as usize, self.total_subjects as usize);
    }
}

/// Aggregates one non-technical bucket. `None` when the bucket is empty.
///
/// Numeric mode weights each student's average by their subject count.
/// Literal mode averages letter weights (A=5 .. E=1) the same way and maps
/// the result back to a letter. Students without a summary still count
/// towards the bucket but add no subjects.
pub fn level_performance(
    level: Level,
    students: &[&StudentEnrollment],
    scale: GradingScale,
) -> Option<LevelPerformance> {
    if students.is_empty() {
        return None;
    }

    let mut result = LevelPerformance::empty(level, scale);
    let mut weighted_sum = 0.0;
    let mut weight = 0.0;
    let mut literal_sum = 0.0;
    let mut literal_weight = 0.0;

    for perf in students.iter().filter_map(|s| s.performance.as_ref()) {
        result.total_subjects += perf.total_subjects;
        result.subjects_approved += perf.subjects_approved;
        result.subjects_failed += perf.subjects_failed;

        let subjects = f64::from(perf.total_subjects);
        if let Some(value) = perf.average.numeric() {
            if perf.total_subjects > 0 {
                weighted_sum += value * subjects;
                weight += subjects;
            }
        }
        if let Some(grade) = perf.average.grade() {
            let factor = if perf.total_subjects > 0 { subjects } else { 1.0 };
            literal_sum += grade.weight() * factor;
            literal_weight += factor;
        }
    }

    if scale.is_literal() {
        if literal_weight > 0.0 {
            let grade = Grade::from_weight(literal_sum / literal_weight);
            result.literal_average = Some(grade);
            result.general_state = Outcome::from_passed(grade.is_passing());
        }
        result.approval_percentage =
            percentage(result.subjects_approved as usize, result.total_subjects as usize);
    } else {
        result.finish_numeric(weighted_sum, weight, scale.pass_mark());
    }

    Some(result)
}

/// Aggregates the technical bucket from mention summaries.
///
/// Students with mention subjects contribute one count per subject, and
/// each subject with a positive average weighs 1. Students without mention
/// subjects fall back to their general summary, weighted by subject count.
pub fn technical_performance(
    students: &[&StudentEnrollment],
    scale: GradingScale,
) -> Option<LevelPerformance> {
    if students.is_empty() {
        return None;
    }

    let mut result = LevelPerformance::empty(Level::SecondaryTechnical, scale);
    result.use_literal = false;
    let mut weighted_sum = 0.0;
    let mut weight = 0.0;

    for student in students {
        if let Some(mention) = student.mention_summary() {
            for subject in &mention.subjects {
                result.total_subjects += 1;
                if subject.state.is_approve() {
                    result.subjects_approved += 1;
                } else {
                    result.subjects_failed += 1;
                }
                if subject.average > 0.0 {
                    weighted_sum += subject.average;
                    weight += 1.0;
                }
            }
        } else if let Some(perf) = &student.performance {
            result.total_subjects += perf.total_subjects;
            result.subjects_approved += perf.subjects_approved;
            result.subjects_failed += perf.subjects_failed;
            if let Some(value) = perf.average.numeric() {
                if perf.total_subjects > 0 {
                    weighted_sum += value * f64::from(perf.total_subjects);
                    weight += f64::from(perf.total_subjects);
                }
            }
        }
    }

    result.finish_numeric(weighted_sum, weight, scale.pass_mark());
    Some(result)
}

/// One row of the performance-by-level overview.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LevelOverview {
    pub level: Level,
    pub name: String,
    pub total_students: usize,
    pub approved_students: usize,
    pub failed_students: usize,
    /// Mean of the non-zero numeric averages
    pub average: f64,
    pub approval_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct PerformanceOverview {
    pub levels: Vec<LevelOverview>,
}

/// Per-student view used by the overview: the technical bucket reads the
/// mention summary when it lists subjects.
fn student_result(student: &StudentEnrollment, level: Level) -> (bool, f64) {
    if level == Level::SecondaryTechnical {
        if let Some(mention) = student.mention_summary() {
            return (mention.state.is_approve(), mention.general_average);
        }
    }
    let average = student
        .performance
        .as_ref()
        .and_then(|perf| perf.average.numeric())
        .unwrap_or(0.0);
    (student.is_approved(), average)
}

/// Overview rows for every non-empty bucket, in display order.
pub fn performance_by_level(buckets: &LevelBuckets<'_>) -> PerformanceOverview {
    let levels = buckets
        .iter()
        .filter(|(_, students)| !students.is_empty())
        .map(|(level, students)| {
            let results: Vec<(bool, f64)> =
                students.iter().map(|s| student_result(s, level)).collect();
            let approved = results.iter().filter(|(passed, _)| *passed).count();
            let averages: Vec<f64> = results
                .iter()
                .map(|(_, average)| *average)
                .filter(|average| *average != 0.0)
                .collect();

            LevelOverview {
                level,
                name: level.label().to_string(),
                total_students: students.len(),
                approved_students: approved,
                failed_students: students.len() - approved,
                average: mean(&averages),
                approval_rate: percentage(approved, students.len()),
            }
        })
        .collect();

    PerformanceOverview { levels }
}
