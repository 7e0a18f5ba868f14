//! Domain rule violations of the school year lifecycle.

use thiserror::Error;

use crate::school_years::Term;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum YearError {
    #[error("School year not found")]
    NotFound,

    #[error("Only draft school years can be started")]
    NotDraft,

    #[error("School year '{name}' is already active. Finish it before starting a new one")]
    AnotherActive { name: String },

    #[error("Only active school years can advance to the next term")]
    NotActiveForTermChange,

    #[error("Already in the third term. Use finish to close the school year")]
    AlreadyFinalTerm,

    #[error("Only active school years can be finished")]
    NotActiveForFinish,

    #[error("A school year can only be finished from the third term. It is currently in term {term}")]
    TermNotFinal { term: Term },

    #[error(
        "Cannot delete school year '{name}' because it has {count} enrolled section(s). Delete the sections first"
    )]
    HasSections { name: String, count: usize },

    #[error(
        "Cannot delete school year '{name}' because it has {count} enrolled student(s). Delete the students first"
    )]
    HasStudents { name: String, count: usize },

    #[error(
        "Cannot delete school year '{name}' because it has {count} assigned professor(s). Delete the professors first"
    )]
    HasProfessors { name: String, count: usize },

    #[error(
        "Cannot delete school year '{name}' because it has {count} recorded evaluation(s). Delete the evaluations first"
    )]
    HasEvaluations { name: String, count: usize },

    #[error(
        "The evaluation mechanism cannot be changed once evaluations exist for this school year"
    )]
    GradingLocked,

    #[error("School year '{name}' is finished. Its records cannot be created, modified or deleted")]
    Locked { name: String },

    #[error("Evaluation type {reference} does not exist or does not belong to the {level} level")]
    InvalidEvaluationType { reference: String, level: String },
}
