//! Record builders shared by the unit tests of this crate.

use yearbook_models::ids::{
    EnrollmentId, EvaluationId, EvaluationScoreId, MentionId, ProfessorId, SectionId, StudentId,
    SubjectId,
};
use yearbook_models::{
    Average, EnrollmentState, Evaluation, EvaluationScore, EvaluationState, Grade,
    MentionScoreSummary, MentionState, MentionSubjectScore, Outcome, PerformanceSummary,
    SchoolLevel, Section, SectionAverageStats, StudentEnrollment,
};

/// Active student with a one-subject numeric summary. Approved at 10 or above.
pub fn student(kind: SchoolLevel, average: f64) -> StudentEnrollment {
    let passed = average >= 10.0;
    StudentEnrollment {
        id: EnrollmentId::new(),
        student_id: StudentId::new(),
        student_name: format!("Student {}", average),
        section_id: None,
        kind,
        state: EnrollmentState::Done,
        current: true,
        mention_id: None,
        mention_name: None,
        mention_state: MentionState::Draft,
        performance: Some(PerformanceSummary {
            total_subjects: 1,
            subjects_approved: u32::from(passed),
            subjects_failed: u32::from(!passed),
            average: Average::Numeric { value: average },
            state: Outcome::from_passed(passed),
        }),
        mention_scores: None,
    }
}

/// Student with `subjects` subjects of which `failed` failed.
pub fn weighted_student(kind: SchoolLevel, average: f64, subjects: u32, failed: u32) -> StudentEnrollment {
    let mut s = student(kind, average);
    s.performance = Some(PerformanceSummary {
        total_subjects: subjects,
        subjects_approved: subjects - failed,
        subjects_failed: failed,
        average: Average::Numeric { value: average },
        state: Outcome::from_passed(failed == 0 && average >= 10.0),
    });
    s
}

pub fn literal_student(kind: SchoolLevel, grade: Grade, subjects: u32) -> StudentEnrollment {
    let mut s = student(kind, 0.0);
    s.student_name = format!("Student {:?}", grade);
    s.performance = Some(PerformanceSummary {
        total_subjects: subjects,
        subjects_approved: if grade.is_passing() { subjects } else { 0 },
        subjects_failed: if grade.is_passing() { 0 } else { subjects },
        average: Average::Literal { grade },
        state: Outcome::from_passed(grade.is_passing()),
    });
    s
}

/// Technical student whose mention summary lists the given subject averages.
pub fn technical_student(mention_id: MentionId, subject_averages: &[f64]) -> StudentEnrollment {
    let mut s = student(SchoolLevel::Secondary, 0.0);
    s.mention_state = MentionState::Enrolled;
    s.mention_id = Some(mention_id);
    s.mention_name = Some("Informatics".to_string());
    let subjects: Vec<MentionSubjectScore> = subject_averages
        .iter()
        .map(|average| MentionSubjectScore {
            subject_id: SubjectId::new(),
            average: *average,
            state: Outcome::from_passed(*average >= 10.0),
        })
        .collect();
    let general_average = if subjects.is_empty() {
        0.0
    } else {
        subject_averages.iter().sum::<f64>() / subject_averages.len() as f64
    };
    let passed = !subjects.is_empty() && subjects.iter().all(|s| s.state.is_approve());
    s.mention_scores = Some(MentionScoreSummary {
        subjects,
        general_average,
        state: Outcome::from_passed(passed),
    });
    s
}

pub fn section(name: &str, kind: SchoolLevel, stats: Option<(u32, u32, f64)>) -> Section {
    Section {
        id: SectionId::new(),
        name: name.to_string(),
        kind,
        subject_ids: vec![],
        professor_ids: vec![],
        average_stats: stats.map(|(total, approved, average)| SectionAverageStats {
            total_students: total,
            approved_students: approved,
            failed_students: total - approved,
            general_average: average,
        }),
        subject_stats: vec![],
    }
}

pub fn evaluation(name: &str, kind: SchoolLevel, professor_id: ProfessorId, section_id: SectionId) -> Evaluation {
    Evaluation {
        id: EvaluationId::new(),
        name: name.to_string(),
        date: None,
        state: EvaluationState::Draft,
        kind,
        professor_id,
        section_id,
        subject_id: None,
        score_average: 0.0,
    }
}

pub fn score(evaluation: &Evaluation, enrollment: &StudentEnrollment, points_20: f64, literal: Option<Grade>) -> EvaluationScore {
    EvaluationScore {
        id: EvaluationScoreId::new(),
        evaluation_id: evaluation.id,
        enrollment_id: Some(enrollment.id),
        subject_id: evaluation.subject_id,
        points_20,
        literal,
    }
}
