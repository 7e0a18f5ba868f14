//! Section and mention-section stats computed from generated students.

use yearbook_core::math::mean;
use yearbook_models::{MentionSection, Section, SectionAverageStats, SubjectAverageStats};

use super::students::GeneratedStudent;

pub fn fill_section_stats(sections: &mut [Section], students: &[GeneratedStudent]) {
    for section in sections.iter_mut() {
        let roster: Vec<&GeneratedStudent> = students
            .iter()
            .filter(|s| s.enrollment.section_id == Some(section.id) && s.enrollment.is_active())
            .collect();

        let approved = roster.iter().filter(|s| s.enrollment.is_approved()).count() as u32;
        let averages: Vec<f64> = roster
            .iter()
            .filter_map(|s| s.enrollment.performance.as_ref())
            .map(|perf| perf.average.ranking_value())
            .collect();
        section.average_stats = Some(SectionAverageStats {
            total_students: roster.len() as u32,
            approved_students: approved,
            failed_students: roster.len() as u32 - approved,
            general_average: mean(&averages),
        });

        section.subject_stats = section
            .subject_ids
            .iter()
            .map(|subject_id| {
                let points: Vec<f64> = roster
                    .iter()
                    .flat_map(|s| s.subject_points.iter())
                    .filter(|(id, _)| id == subject_id)
                    .map(|(_, p)| *p)
                    .collect();
                let approved = points.iter().filter(|p| **p >= 10.0).count() as u32;
                SubjectAverageStats {
                    subject_id: *subject_id,
                    total_students: points.len() as u32,
                    approved_students: approved,
                    failed_students: points.len() as u32 - approved,
                    average: mean(&points),
                }
            })
            .collect();
    }
}

pub fn fill_mention_stats(mention_sections: &mut [MentionSection], students: &[GeneratedStudent]) {
    for mention_section in mention_sections.iter_mut() {
        let members: Vec<&GeneratedStudent> = students
            .iter()
            .filter(|s| {
                s.enrollment.mention_id == Some(mention_section.mention_id)
                    && s.enrollment.is_active()
            })
            .collect();
        let approved = members
            .iter()
            .filter(|s| s.enrollment.is_mention_approved())
            .count() as u32;
        let averages: Vec<f64> = members
            .iter()
            .filter_map(|s| s.enrollment.mention_summary())
            .map(|summary| summary.general_average)
            .collect();

        mention_section.average_stats = Some(SectionAverageStats {
            total_students: members.len() as u32,
            approved_students: approved,
            failed_students: members.len() as u32 - approved,
            general_average: mean(&averages),
        });
    }
}
