//! Evaluations and their scores, drawn around each student's results.

use chrono::{Duration, NaiveDate};
use fake::Fake;
use yearbook_core::math::{mean, round2};
use yearbook_models::ids::{EvaluationId, EvaluationScoreId};
use yearbook_models::{
    Evaluation, EvaluationScore, EvaluationState, GradingConfig, Professor, SchoolLevel, Section,
    Subject,
};

use super::structure::assigned_professor;
use super::students::GeneratedStudent;

/// Grading progress by position in a section's evaluation list.
fn state_for(index: usize) -> EvaluationState {
    match index % 5 {
        3 => EvaluationState::Partial,
        4 => EvaluationState::Draft,
        _ => EvaluationState::All,
    }
}

fn evaluation_name(section: &Section, index: usize, subject: Option<&str>) -> String {
    match (section.kind, subject) {
        (_, Some(subject)) => format!("{subject} - Test {}", index + 1),
        (SchoolLevel::Preschool, None) => format!("Observation {}", index + 1),
        _ => format!("Assessment {}", index + 1),
    }
}

fn noisy(points: f64) -> f64 {
    round2((points + (-2.0..2.0).fake::<f64>()).clamp(0.0, 20.0))
}

/// Builds `per_section` evaluations for every section, scoring the active
/// students of the section.
///
/// Fully graded evaluations score everyone, partial ones every other
/// student, drafts nobody.
pub fn generate_evaluations(
    sections: &[Section],
    professors: &[Professor],
    subjects: &[Subject],
    students: &[GeneratedStudent],
    per_section: usize,
    grading: &GradingConfig,
    start: NaiveDate,
) -> (Vec<Evaluation>, Vec<EvaluationScore>) {
    let mut evaluations = Vec::with_capacity(sections.len() * per_section);
    let mut scores = Vec::new();
    if professors.is_empty() {
        return (evaluations, scores);
    }

    for (section_index, section) in sections.iter().enumerate() {
        let literal = grading.for_school_level(section.kind).is_literal();
        let roster: Vec<&GeneratedStudent> = students
            .iter()
            .filter(|s| s.enrollment.section_id == Some(section.id) && s.enrollment.is_active())
            .collect();

        for index in 0..per_section {
            let subject_slot = match section.subject_ids.len() {
                0 => None,
                n => Some(index % n),
            };
            let subject_id = subject_slot.map(|slot| section.subject_ids[slot]);
            let subject_name = subject_id
                .and_then(|id| subjects.iter().find(|s| s.id == id))
                .map(|s| s.name.as_str());
            let professor = &professors
                [assigned_professor(section_index, subject_slot.unwrap_or(0), professors.len())];
            let state = state_for(index);

            let mut evaluation = Evaluation {
                id: EvaluationId::new(),
                name: evaluation_name(section, index, subject_name),
                date: Some(start + Duration::days(7 * (index as i64 + 1))),
                state,
                kind: section.kind,
                professor_id: professor.id,
                section_id: section.id,
                subject_id,
                score_average: 0.0,
            };

            let graded = roster.iter().enumerate().filter(|(i, _)| match state {
                EvaluationState::All => true,
                EvaluationState::Partial => i % 2 == 0,
                EvaluationState::Draft => false,
            });

            let mut values = Vec::new();
            for (_, student) in graded {
                let basis = subject_id
                    .and_then(|id| {
                        student
                            .subject_points
                            .iter()
                            .find(|(subject, _)| *subject == id)
                            .map(|(_, points)| *points)
                    })
                    .unwrap_or(student.baseline);
                let letter = if literal { student.grade } else { None };
                let score = EvaluationScore {
                    id: EvaluationScoreId::new(),
                    evaluation_id: evaluation.id,
                    enrollment_id: Some(student.enrollment.id),
                    subject_id,
                    points_20: letter.map_or_else(|| noisy(basis), |g| g.points()),
                    literal: letter,
                };
                values.push(score.scored_value(literal));
                scores.push(score);
            }

            evaluation.score_average = mean(&values);
            evaluations.push(evaluation);
        }
    }

    (evaluations, scores)
}
