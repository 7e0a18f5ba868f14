//! Grading scales, literal grades, and evaluation-type configuration.
//!
//! A school year references one evaluation type per school level. The
//! referenced type decides whether that level is graded on points (20 or 100)
//! or with literal grades (A-E).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::enrollments::{Level, SchoolLevel};
use crate::ids::EvaluationTypeId;

/// How an evaluation type expresses results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum GradingScale {
    /// Points on a 0-20 scale.
    #[default]
    #[serde(rename = "20")]
    Twenty,
    /// Points on a 0-100 scale.
    #[serde(rename = "100")]
    Hundred,
    /// Letters A-E.
    #[serde(rename = "literal")]
    Literal,
    /// Descriptive observations (preschool).
    #[serde(rename = "observation")]
    Observation,
}

impl GradingScale {
    pub fn is_literal(self) -> bool {
        self == GradingScale::Literal
    }

    /// Minimum average a numeric result needs to pass.
    ///
    /// Anything that is not the 20-point scale is judged against 50.
    pub fn pass_mark(self) -> f64 {
        match self {
            GradingScale::Twenty => 10.0,
            _ => 50.0,
        }
    }

    /// Suffix appended to numeric averages for display ("15/20").
    pub fn suffix(self) -> &'static str {
        match self {
            GradingScale::Twenty => "/20",
            _ => "/100",
        }
    }
}

/// Literal grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E];

    /// Weight used when averaging letters: A=5 .. E=1.
    pub fn weight(self) -> f64 {
        match self {
            Grade::A => 5.0,
            Grade::B => 4.0,
            Grade::C => 3.0,
            Grade::D => 2.0,
            Grade::E => 1.0,
        }
    }

    /// Equivalent on the 20-point scale, used to rank and average letters
    /// alongside numeric results.
    pub fn points(self) -> f64 {
        match self {
            Grade::A => 18.0,
            Grade::B => 15.0,
            Grade::C => 12.0,
            Grade::D => 8.0,
            Grade::E => 4.0,
        }
    }

    /// Maps an averaged [`Grade::weight`] back to a letter.
    pub fn from_weight(weight: f64) -> Grade {
        if weight >= 4.5 {
            Grade::A
        } else if weight >= 3.5 {
            Grade::B
        } else if weight >= 2.5 {
            Grade::C
        } else if weight >= 1.5 {
            Grade::D
        } else {
            Grade::E
        }
    }

    /// A, B and C pass.
    pub fn is_passing(self) -> bool {
        matches!(self, Grade::A | Grade::B | Grade::C)
    }
}

/// Evaluation type configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvaluationType {
    pub id: EvaluationTypeId,
    pub name: String,
    /// School level this type may be assigned to
    pub level: SchoolLevel,
    pub scale: GradingScale,
}

impl EvaluationType {
    /// The stock catalog every new store starts with.
    pub fn default_catalog() -> Vec<EvaluationType> {
        vec![
            EvaluationType {
                id: EvaluationTypeId::from_u128(1),
                name: "Secondary - 20 points".to_string(),
                level: SchoolLevel::Secondary,
                scale: GradingScale::Twenty,
            },
            EvaluationType {
                id: EvaluationTypeId::from_u128(2),
                name: "Secondary - 100 points".to_string(),
                level: SchoolLevel::Secondary,
                scale: GradingScale::Hundred,
            },
            EvaluationType {
                id: EvaluationTypeId::from_u128(3),
                name: "Primary - literal".to_string(),
                level: SchoolLevel::Primary,
                scale: GradingScale::Literal,
            },
            EvaluationType {
                id: EvaluationTypeId::from_u128(4),
                name: "Primary - 20 points".to_string(),
                level: SchoolLevel::Primary,
                scale: GradingScale::Twenty,
            },
            EvaluationType {
                id: EvaluationTypeId::from_u128(5),
                name: "Preschool - observation".to_string(),
                level: SchoolLevel::Preschool,
                scale: GradingScale::Observation,
            },
            EvaluationType {
                id: EvaluationTypeId::from_u128(6),
                name: "Preschool - literal".to_string(),
                level: SchoolLevel::Preschool,
                scale: GradingScale::Literal,
            },
        ]
    }
}

/// Resolved grading scale per school level for one year.
///
/// Missing references resolve to [`GradingScale::Twenty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct GradingConfig {
    pub preschool: GradingScale,
    pub primary: GradingScale,
    pub secondary: GradingScale,
}

impl GradingConfig {
    pub fn for_school_level(&self, level: SchoolLevel) -> GradingScale {
        match level {
            SchoolLevel::Preschool => self.preschool,
            SchoolLevel::Primary => self.primary,
            SchoolLevel::Secondary => self.secondary,
        }
    }

    /// Both secondary buckets share the secondary configuration.
    pub fn for_level(&self, level: Level) -> GradingScale {
        self.for_school_level(level.school_level())
    }
}
