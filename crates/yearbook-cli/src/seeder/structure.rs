//! Subjects, mentions, sections and professors of a generated year.

use fake::Fake;
use fake::faker::name::en::Name;
use yearbook_models::ids::{MentionId, MentionSectionId, ProfessorId, SectionId, SubjectId};
use yearbook_models::{MentionSection, Professor, SchoolLevel, Section, Subject};

use super::models::SeedConfig;

const SECONDARY_SUBJECTS: &[&str] = &[
    "Mathematics",
    "Language and Literature",
    "English",
    "Biology",
    "Chemistry",
    "Physics",
    "History",
    "Geography",
];

const MENTIONS: &[(&str, &[&str])] = &[
    ("Computer Science", &["Programming", "Networks", "Databases"]),
    ("Accounting", &["Bookkeeping", "Cost Accounting", "Tax Law"]),
];

const SECTION_LETTERS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// A technical mention with the subjects its students are scored on.
#[derive(Debug, Clone)]
pub struct MentionPlan {
    pub id: MentionId,
    pub name: String,
    pub subject_ids: Vec<SubjectId>,
}

/// Records that do not depend on students or scores.
#[derive(Debug, Clone, Default)]
pub struct YearStructure {
    pub subjects: Vec<Subject>,
    pub secondary_subjects: Vec<SubjectId>,
    pub mentions: Vec<MentionPlan>,
    pub sections: Vec<Section>,
    pub mention_sections: Vec<MentionSection>,
    pub professors: Vec<Professor>,
}

fn subject(name: &str) -> Subject {
    Subject {
        id: SubjectId::new(),
        name: name.to_string(),
    }
}

fn section_name(kind: SchoolLevel, index: usize) -> String {
    let level = match kind {
        SchoolLevel::Preschool => "Preschool",
        SchoolLevel::Primary => "Primary",
        SchoolLevel::Secondary => "Secondary",
    };
    let letter = SECTION_LETTERS[index % SECTION_LETTERS.len()];
    match index / SECTION_LETTERS.len() {
        0 => format!("{level} {letter}"),
        round => format!("{level} {letter}{}", round + 1),
    }
}

/// Professor teaching `subject_index` in the section at `section_index`.
/// Primary and preschool sections use index 0 for their single professor.
pub fn assigned_professor(section_index: usize, subject_index: usize, professors: usize) -> usize {
    (section_index + subject_index) % professors.max(1)
}

pub fn generate_structure(config: &SeedConfig) -> YearStructure {
    let mut structure = YearStructure::default();

    for name in SECONDARY_SUBJECTS {
        let s = subject(name);
        structure.secondary_subjects.push(s.id);
        structure.subjects.push(s);
    }

    for (name, subjects) in MENTIONS {
        let subject_ids = subjects
            .iter()
            .map(|name| {
                let s = subject(name);
                let id = s.id;
                structure.subjects.push(s);
                id
            })
            .collect();
        let mention = MentionPlan {
            id: MentionId::new(),
            name: name.to_string(),
            subject_ids,
        };
        structure.mention_sections.push(MentionSection {
            id: MentionSectionId::new(),
            mention_id: mention.id,
            name: format!("{name} - Group 1"),
            active: true,
            average_stats: None,
        });
        structure.mentions.push(mention);
    }

    let professor_count = config.professors.max(1);
    structure.professors = (0..professor_count)
        .map(|_| Professor {
            id: ProfessorId::new(),
            name: Name().fake(),
            section_ids: Vec::new(),
            subject_ids: Vec::new(),
        })
        .collect();

    let mut section_index = 0;
    for kind in [SchoolLevel::Preschool, SchoolLevel::Primary, SchoolLevel::Secondary] {
        for i in 0..config.sections_per_level {
            let subject_ids = match kind {
                SchoolLevel::Secondary => structure.secondary_subjects.clone(),
                _ => Vec::new(),
            };
            let teaching_slots = subject_ids.len().max(1);
            let mut professor_ids: Vec<ProfessorId> = Vec::new();

            for slot in 0..teaching_slots {
                let professor =
                    &mut structure.professors[assigned_professor(section_index, slot, professor_count)];
                if !professor_ids.contains(&professor.id) {
                    professor_ids.push(professor.id);
                }
                if let Some(subject_id) = subject_ids.get(slot) {
                    if !professor.subject_ids.contains(subject_id) {
                        professor.subject_ids.push(*subject_id);
                    }
                }
            }

            let section = Section {
                id: SectionId::new(),
                name: section_name(kind, i),
                kind,
                subject_ids,
                professor_ids,
                average_stats: None,
                subject_stats: Vec::new(),
            };
            for professor in structure
                .professors
                .iter_mut()
                .filter(|p| section.professor_ids.contains(&p.id))
            {
                professor.section_ids.push(section.id);
            }
            structure.sections.push(section);
            section_index += 1;
        }
    }

    structure
}
