//! Knobs for dataset generation.

/// How much of a school year to generate.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Sections per school level (preschool, primary, secondary)
    pub sections_per_level: usize,
    pub students_per_section: usize,
    pub professors: usize,
    pub evaluations_per_section: usize,
    /// One in `mention_ratio` secondary students joins a technical mention
    pub mention_ratio: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sections_per_level: 2,
            students_per_section: 20,
            professors: 8,
            evaluations_per_section: 4,
            mention_ratio: 4,
        }
    }
}

impl SeedConfig {
    pub fn new(sections_per_level: usize, students_per_section: usize) -> Self {
        Self {
            sections_per_level,
            students_per_section,
            ..Default::default()
        }
    }

    pub fn with_professors(mut self, professors: usize) -> Self {
        self.professors = professors.max(1);
        self
    }

    pub fn with_evaluations(mut self, evaluations_per_section: usize) -> Self {
        self.evaluations_per_section = evaluations_per_section;
        self
    }

    pub fn total_sections(&self) -> usize {
        self.sections_per_level * 3
    }

    pub fn total_students(&self) -> usize {
        self.total_sections() * self.students_per_section
    }
}
