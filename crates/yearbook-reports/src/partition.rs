//! Active-student partitioning.
//!
//! Only enrollments that are current and done are reported on. They split
//! into four disjoint buckets by [`StudentEnrollment::level`].

use yearbook_models::{Level, StudentEnrollment};

#[derive(Debug, Clone, Default)]
pub struct LevelBuckets<'a> {
    pub preschool: Vec<&'a StudentEnrollment>,
    pub primary: Vec<&'a StudentEnrollment>,
    pub secondary_general: Vec<&'a StudentEnrollment>,
    pub secondary_technical: Vec<&'a StudentEnrollment>,
}

impl<'a> LevelBuckets<'a> {
    pub fn from_enrollments(enrollments: &'a [StudentEnrollment]) -> Self {
        let mut buckets = Self::default();
        for enrollment in enrollments.iter().filter(|e| e.is_active()) {
            match enrollment.level() {
                Level::Preschool => buckets.preschool.push(enrollment),
                Level::Primary => buckets.primary.push(enrollment),
                Level::SecondaryGeneral => buckets.secondary_general.push(enrollment),
                Level::SecondaryTechnical => buckets.secondary_technical.push(enrollment),
            }
        }
        buckets
    }

    pub fn get(&self, level: Level) -> &[&'a StudentEnrollment] {
        match level {
            Level::Preschool => &self.preschool,
            Level::Primary => &self.primary,
            Level::SecondaryGeneral => &self.secondary_general,
            Level::SecondaryTechnical => &self.secondary_technical,
        }
    }

    /// Buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &[&'a StudentEnrollment])> + '_ {
        Level::ALL.into_iter().map(move |level| (level, self.get(level)))
    }

    /// Every active student.
    pub fn all(&self) -> impl Iterator<Item = &'a StudentEnrollment> + '_ {
        self.iter().flat_map(|(_, students)| students.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, students)| students.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::student;
    use yearbook_models::{EnrollmentState, MentionState, SchoolLevel};

    #[test]
    fn test_only_current_done_students_are_partitioned() {
        let mut cancelled = student(SchoolLevel::Primary, 12.0);
        cancelled.state = EnrollmentState::Cancel;
        let mut old = student(SchoolLevel::Primary, 12.0);
        old.current = false;

        let enrollments = vec![cancelled, old, student(SchoolLevel::Primary, 14.0)];
        let buckets = LevelBuckets::from_enrollments(&enrollments);

        assert_eq!(buckets.total(), 1);
        assert_eq!(buckets.primary.len(), 1);
    }

    #[test]
    fn test_buckets_are_disjoint_and_cover_active_students() {
        let mut technical = student(SchoolLevel::Secondary, 15.0);
        technical.mention_state = MentionState::Enrolled;

        let enrollments = vec![
            student(SchoolLevel::Preschool, 0.0),
            student(SchoolLevel::Primary, 11.0),
            student(SchoolLevel::Secondary, 13.0),
            technical,
        ];
        let buckets = LevelBuckets::from_enrollments(&enrollments);

        for (_, students) in buckets.iter() {
            assert_eq!(students.len(), 1);
        }
        assert_eq!(buckets.all().count(), enrollments.len());
        assert_eq!(
            buckets.get(Level::SecondaryTechnical)[0].mention_state,
            MentionState::Enrolled
        );
    }
}
