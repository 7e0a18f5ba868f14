//! Facade over one year's records.
//!
//! [`YearReport`] partitions the students once and hands out every report.
//! Each call recomputes from the snapshot; callers decide what to cache.

use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;
use yearbook_models::{GradingConfig, GradingScale, Level, YearRecords};

use crate::counts::{
    DashboardCounts, SectionsDistribution, StudentsDistribution, dashboard_counts,
    sections_distribution, students_distribution,
};
use crate::evaluations::{EvaluationStats, RecentEvaluations, evaluation_stats, recent_evaluations};
use crate::level_dashboard::{LevelDashboard, level_dashboard};
use crate::partition::LevelBuckets;
use crate::performance::{
    LevelPerformance, PerformanceOverview, level_performance, performance_by_level,
    technical_performance,
};
use crate::professors::{
    ProfessorsDetailedReport, ProfessorsReport, professor_detailed_stats, professor_summary,
};
use crate::ranking::{
    ApprovalRate, DifficultSubjects, SectionsComparison, TopStudentsOfYear, approval_rate,
    best_sections, difficult_subjects, top_students_of_year,
};

pub struct YearReport<'a> {
    records: &'a YearRecords,
    grading: GradingConfig,
    buckets: LevelBuckets<'a>,
}

impl<'a> YearReport<'a> {
    pub fn new(records: &'a YearRecords, grading: GradingConfig) -> Self {
        Self {
            records,
            grading,
            buckets: LevelBuckets::from_enrollments(&records.enrollments),
        }
    }

    pub fn buckets(&self) -> &LevelBuckets<'a> {
        &self.buckets
    }

    fn scale(&self, level: Level) -> GradingScale {
        self.grading.for_level(level)
    }

    pub fn counts(&self) -> DashboardCounts {
        dashboard_counts(self.records, &self.buckets)
    }

    pub fn performance_by_level(&self) -> PerformanceOverview {
        performance_by_level(&self.buckets)
    }

    pub fn students_distribution(&self) -> StudentsDistribution {
        students_distribution(&self.buckets)
    }

    pub fn sections_distribution(&self) -> SectionsDistribution {
        sections_distribution(self.records)
    }

    pub fn approval_rate(&self) -> ApprovalRate {
        approval_rate(&self.buckets)
    }

    pub fn sections_comparison(&self) -> SectionsComparison {
        best_sections(self.records)
    }

    pub fn top_students(&self) -> TopStudentsOfYear {
        top_students_of_year(self.records, &self.buckets, |level| self.scale(level))
    }

    pub fn professors(&self) -> ProfessorsReport {
        professor_summary(self.records)
    }

    pub fn professors_detailed(&self) -> ProfessorsDetailedReport {
        professor_detailed_stats(self.records, &self.grading)
    }

    pub fn difficult_subjects(&self) -> DifficultSubjects {
        difficult_subjects(self.records)
    }

    pub fn evaluation_stats(&self) -> EvaluationStats {
        evaluation_stats(self.records)
    }

    pub fn recent_evaluations(&self) -> RecentEvaluations {
        recent_evaluations(self.records)
    }

    /// Subject-weighted performance of `level`. `None` when it has no
    /// active students.
    pub fn level_performance(&self, level: Level) -> Option<LevelPerformance> {
        let students = self.buckets.get(level);
        match level {
            Level::SecondaryTechnical => technical_performance(students, self.scale(level)),
            _ => level_performance(level, students, self.scale(level)),
        }
    }

    pub fn level_dashboard(&self, level: Level) -> LevelDashboard {
        level_dashboard(self.records, level, self.buckets.get(level), self.scale(level))
    }

    #[instrument(skip(self))]
    pub fn full(&self) -> FullDashboard {
        FullDashboard {
            grading: self.grading,
            counts: self.counts(),
            performance_by_level: self.performance_by_level(),
            students_distribution: self.students_distribution(),
            sections_distribution: self.sections_distribution(),
            approval_rate: self.approval_rate(),
            sections_comparison: self.sections_comparison(),
            top_students: self.top_students(),
            professors: self.professors(),
            professors_detailed: self.professors_detailed(),
            difficult_subjects: self.difficult_subjects(),
            evaluation_stats: self.evaluation_stats(),
            recent_evaluations: self.recent_evaluations(),
            level_performance: Level::ALL
                .into_iter()
                .filter_map(|level| self.level_performance(level))
                .collect(),
            level_dashboards: Level::ALL
                .into_iter()
                .map(|level| self.level_dashboard(level))
                .collect(),
        }
    }
}

/// Every dashboard report in one payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FullDashboard {
    pub grading: GradingConfig,
    pub counts: DashboardCounts,
    pub performance_by_level: PerformanceOverview,
    pub students_distribution: StudentsDistribution,
    pub sections_distribution: SectionsDistribution,
    pub approval_rate: ApprovalRate,
    pub sections_comparison: SectionsComparison,
    pub top_students: TopStudentsOfYear,
    pub professors: ProfessorsReport,
    pub professors_detailed: ProfessorsDetailedReport,
    pub difficult_subjects: DifficultSubjects,
    pub evaluation_stats: EvaluationStats,
    pub recent_evaluations: RecentEvaluations,
    /// Non-empty levels only
    pub level_performance: Vec<LevelPerformance>,
    /// One per level, in display order
    pub level_dashboards: Vec<LevelDashboard>,
}
