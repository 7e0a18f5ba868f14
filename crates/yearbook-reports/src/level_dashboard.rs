//! Dashboard tab of a single level.
//!
//! Preschool and primary results are grouped by evaluation. Secondary
//! results are grouped by subject, and scores without a subject are left
//! out. Technical students are ranked per mention instead of per section.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use yearbook_core::math::{percentage, round2};
use yearbook_models::ids::EnrollmentId;
use yearbook_models::{Average, Grade, GradingScale, Level, StudentEnrollment, YearRecords};

use crate::ranking::{GroupTop, TopStudent, top_by_group};

/// Pass mark for a single score, always on the 20-point scale.
const SCORE_PASS_MARK: f64 = 10.0;

/// Results of one evaluation or subject within a level.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PerformanceGroup {
    /// Evaluation id, or subject id for secondary levels
    pub id: Uuid,
    pub name: String,
    /// Author of the evaluation; absent for subject groups
    pub professor_name: Option<String>,
    pub total: usize,
    pub approved_count: usize,
    /// Mean of `points_20`, or the most frequent letter in literal mode
    pub average: Average,
    pub approval_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LevelDashboard {
    pub level: Level,
    pub total_students: usize,
    pub approved_count: usize,
    pub failed_count: usize,
    pub approval_rate: f64,
    pub performance_data: Vec<PerformanceGroup>,
    pub top_students_by_section: Vec<GroupTop>,
    pub evaluation_type: GradingScale,
    pub use_literal: bool,
}

#[derive(Default)]
struct GroupTally {
    name: String,
    professor_name: Option<String>,
    points: Vec<f64>,
    letters: Vec<Grade>,
    total: usize,
    approved: usize,
}

impl GroupTally {
    fn average(&self, literal_mode: bool) -> Average {
        if literal_mode {
            if let Some(grade) = most_frequent(&self.letters) {
                return Average::Literal { grade };
            }
        }
        let value = if self.points.is_empty() {
            0.0
        } else {
            round2(self.points.iter().sum::<f64>() / self.points.len() as f64)
        };
        Average::Numeric { value }
    }
}

/// Most frequent letter. Ties go to the letter seen first.
fn most_frequent(letters: &[Grade]) -> Option<Grade> {
    let mut counts: Vec<(Grade, usize)> = Vec::new();
    for letter in letters {
        match counts.iter_mut().find(|(g, _)| g == letter) {
            Some((_, n)) => *n += 1,
            None => counts.push((*letter, 1)),
        }
    }
    let mut best: Option<(Grade, usize)> = None;
    for (grade, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((grade, n));
        }
    }
    best.map(|(grade, _)| grade)
}

fn performance_data(
    records: &YearRecords,
    students: &[&StudentEnrollment],
    level: Level,
    literal_mode: bool,
) -> Vec<PerformanceGroup> {
    let by_evaluation = matches!(level, Level::Preschool | Level::Primary);
    let members: HashSet<EnrollmentId> = students.iter().map(|s| s.id).collect();

    let mut order: Vec<Uuid> = Vec::new();
    let mut tallies: HashMap<Uuid, GroupTally> = HashMap::new();

    let scores = records
        .scores
        .iter()
        .filter(|s| s.enrollment_id.is_some_and(|id| members.contains(&id)));
    for score in scores {
        let key = if by_evaluation {
            score.evaluation_id.into_inner()
        } else {
            match score.subject_id {
                Some(id) => id.into_inner(),
                None => continue,
            }
        };

        let tally = tallies.entry(key).or_insert_with(|| {
            order.push(key);
            if by_evaluation {
                let evaluation = records.evaluation(score.evaluation_id);
                GroupTally {
                    name: evaluation.map(|e| e.name.clone()).unwrap_or_default(),
                    professor_name: Some(
                        evaluation
                            .map(|e| records.professor_name(e.professor_id))
                            .filter(|name| !name.is_empty())
                            .unwrap_or_else(|| "N/A".to_string()),
                    ),
                    ..Default::default()
                }
            } else {
                GroupTally {
                    name: score
                        .subject_id
                        .map(|id| records.subject_name(id))
                        .unwrap_or_default(),
                    ..Default::default()
                }
            }
        });

        tally.total += 1;
        match score.literal.filter(|_| literal_mode) {
            Some(letter) => {
                tally.letters.push(letter);
                if letter.is_passing() {
                    tally.approved += 1;
                }
            }
            None => {
                tally.points.push(score.points_20);
                if score.points_20 >= SCORE_PASS_MARK {
                    tally.approved += 1;
                }
            }
        }
    }

    let mut groups: Vec<PerformanceGroup> = order
        .into_iter()
        .filter_map(|id| {
            let tally = tallies.remove(&id)?;
            Some(PerformanceGroup {
                id,
                average: tally.average(literal_mode),
                approval_rate: percentage(tally.approved, tally.total),
                name: tally.name,
                professor_name: tally.professor_name,
                total: tally.total,
                approved_count: tally.approved,
            })
        })
        .collect();
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
}

fn top_students(
    records: &YearRecords,
    students: &[&StudentEnrollment],
    level: Level,
    scale: GradingScale,
) -> Vec<GroupTop> {
    let entries: Vec<(Option<Uuid>, String, TopStudent)> = if level == Level::SecondaryTechnical {
        students
            .iter()
            .filter_map(|s| {
                let mention = s.mention_id?;
                Some((
                    Some(mention.into_inner()),
                    s.mention_name.clone().unwrap_or_default(),
                    TopStudent::technical(s, scale),
                ))
            })
            .collect()
    } else {
        students
            .iter()
            .map(|s| {
                let name = s.section_id.map(|id| records.section_name(id)).unwrap_or_default();
                (
                    s.section_id.map(|id| id.into_inner()),
                    name.clone(),
                    TopStudent::general(s, name, scale),
                )
            })
            .collect()
    };
    top_by_group(entries)
}

/// Builds the tab of `level` from its bucket of active students.
pub fn level_dashboard(
    records: &YearRecords,
    level: Level,
    students: &[&StudentEnrollment],
    scale: GradingScale,
) -> LevelDashboard {
    let use_literal = scale.is_literal();
    let approved = students.iter().filter(|s| s.is_approved()).count();

    LevelDashboard {
        level,
        total_students: students.len(),
        approved_count: approved,
        failed_count: students.len() - approved,
        approval_rate: percentage(approved, students.len()),
        performance_data: performance_data(records, students, level, use_literal),
        top_students_by_section: top_students(records, students, level, scale),
        evaluation_type: scale,
        use_literal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{evaluation, literal_student, score, section, student, technical_student};
    use yearbook_models::ids::{MentionId, ProfessorId, SubjectId};
    use yearbook_models::{Professor, SchoolLevel, Subject};

    #[test]
    fn test_most_frequent_prefers_first_seen_on_ties() {
        assert_eq!(most_frequent(&[Grade::B, Grade::A, Grade::A, Grade::B]), Some(Grade::B));
        assert_eq!(most_frequent(&[Grade::C, Grade::A, Grade::A]), Some(Grade::A));
        assert_eq!(most_frequent(&[]), None);
    }

    #[test]
    fn test_primary_groups_by_evaluation_in_literal_mode() {
        let professor = Professor {
            id: ProfessorId::new(),
            name: "Rosa".to_string(),
            section_ids: vec![],
            subject_ids: vec![],
        };
        let mut group = section("1A", SchoolLevel::Primary, None);
        group.professor_ids = vec![professor.id];

        let mut ana = literal_student(SchoolLevel::Primary, Grade::A, 2);
        ana.section_id = Some(group.id);
        let mut ben = literal_student(SchoolLevel::Primary, Grade::D, 2);
        ben.section_id = Some(group.id);

        let reading = evaluation("Reading", SchoolLevel::Primary, professor.id, group.id);
        let drawing = evaluation("Drawing", SchoolLevel::Primary, professor.id, group.id);

        let records = YearRecords {
            scores: vec![
                score(&reading, &ana, 0.0, Some(Grade::A)),
                score(&reading, &ben, 0.0, Some(Grade::D)),
                score(&reading, &ben, 0.0, Some(Grade::A)),
                // no letter: scored on points even in literal mode
                score(&drawing, &ana, 14.0, None),
            ],
            evaluations: vec![reading, drawing],
            sections: vec![group],
            professors: vec![professor],
            enrollments: vec![ana, ben],
            ..Default::default()
        };
        let students: Vec<&StudentEnrollment> = records.enrollments.iter().collect();
        let dashboard = level_dashboard(&records, Level::Primary, &students, GradingScale::Literal);

        assert_eq!(dashboard.total_students, 2);
        assert_eq!(dashboard.approved_count, 1);
        assert_eq!(dashboard.approval_rate, 50.0);
        assert!(dashboard.use_literal);

        let names: Vec<&str> = dashboard.performance_data.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Drawing", "Reading"]);
        let reading = &dashboard.performance_data[1];
        assert_eq!(reading.average, Average::Literal { grade: Grade::A });
        assert_eq!(reading.approved_count, 2);
        assert_eq!(reading.approval_rate, 66.67);
        assert_eq!(reading.professor_name.as_deref(), Some("Rosa"));
        assert_eq!(dashboard.performance_data[0].average, Average::Numeric { value: 14.0 });

        assert_eq!(dashboard.top_students_by_section.len(), 1);
        let top = &dashboard.top_students_by_section[0];
        assert_eq!(top.group_name, "1A");
        assert_eq!(top.top_3[0].display, "A");
    }

    #[test]
    fn test_secondary_groups_by_subject_and_skips_unassigned_scores() {
        let math = SubjectId::new();
        let group = section("4A", SchoolLevel::Secondary, None);
        let mut algebra = evaluation("Algebra", SchoolLevel::Secondary, ProfessorId::new(), group.id);
        algebra.subject_id = Some(math);
        let assembly = evaluation("Assembly", SchoolLevel::Secondary, ProfessorId::new(), group.id);

        let mut teen = student(SchoolLevel::Secondary, 12.0);
        teen.section_id = Some(group.id);

        let records = YearRecords {
            scores: vec![
                score(&algebra, &teen, 8.0, None),
                score(&algebra, &teen, 15.0, None),
                score(&assembly, &teen, 20.0, None),
            ],
            subjects: vec![Subject {
                id: math,
                name: "Mathematics".to_string(),
            }],
            evaluations: vec![algebra, assembly],
            sections: vec![group],
            enrollments: vec![teen],
            ..Default::default()
        };
        let students: Vec<&StudentEnrollment> = records.enrollments.iter().collect();
        let dashboard =
            level_dashboard(&records, Level::SecondaryGeneral, &students, GradingScale::Twenty);

        assert_eq!(dashboard.performance_data.len(), 1);
        let group = &dashboard.performance_data[0];
        assert_eq!(group.name, "Mathematics");
        assert_eq!(group.total, 2);
        assert_eq!(group.average, Average::Numeric { value: 11.5 });
        assert_eq!(group.approval_rate, 50.0);
        assert!(group.professor_name.is_none());
        assert_eq!(dashboard.top_students_by_section[0].top_3[0].display, "12/20");
    }

    #[test]
    fn test_technical_ranks_per_mention() {
        let informatics = MentionId::new();
        let mut a = technical_student(informatics, &[15.0, 17.0]);
        a.mention_name = Some("Informatics".to_string());
        let mut b = technical_student(MentionId::new(), &[12.0]);
        b.mention_name = Some("Accounting".to_string());
        let mut orphan = technical_student(MentionId::new(), &[19.0]);
        orphan.mention_id = None;

        let records = YearRecords {
            enrollments: vec![a, b, orphan],
            ..Default::default()
        };
        let students: Vec<&StudentEnrollment> = records.enrollments.iter().collect();
        let dashboard = level_dashboard(
            &records,
            Level::SecondaryTechnical,
            &students,
            GradingScale::Twenty,
        );

        let names: Vec<&str> = dashboard
            .top_students_by_section
            .iter()
            .map(|g| g.group_name.as_str())
            .collect();
        assert_eq!(names, vec!["Accounting", "Informatics"]);
        assert_eq!(
            dashboard.top_students_by_section[1].group_id,
            Some(informatics.into_inner())
        );
        assert_eq!(dashboard.top_students_by_section[1].top_3[0].average, 16.0);
    }

    #[test]
    fn test_empty_level() {
        let records = YearRecords::default();
        let dashboard = level_dashboard(&records, Level::Preschool, &[], GradingScale::Observation);
        assert_eq!(dashboard.total_students, 0);
        assert_eq!(dashboard.approval_rate, 0.0);
        assert!(dashboard.performance_data.is_empty());
        assert!(dashboard.top_students_by_section.is_empty());
    }
}
