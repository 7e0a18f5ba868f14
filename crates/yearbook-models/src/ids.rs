//! Strongly-typed ID newtypes for domain entities.
//!
//! Each record kind gets its own wrapper around `Uuid`, so a `SectionId` can
//! never be passed where a `ProfessorId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Useful for fixtures and well-known records.
            #[inline]
            pub const fn from_u128(v: u128) -> Self {
                Self(Uuid::from_u128(v))
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        // Transparent so ids also work as JSON map keys.
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for SchoolYear entities.
    SchoolYearId
);

define_id!(
    /// Strongly-typed ID for StudentEnrollment entities.
    EnrollmentId
);

define_id!(
    /// Strongly-typed ID for the person behind an enrollment.
    StudentId
);

define_id!(
    /// Strongly-typed ID for Section entities.
    SectionId
);

define_id!(
    /// Strongly-typed ID for technical Mention entities.
    MentionId
);

define_id!(
    /// Strongly-typed ID for MentionSection entities.
    MentionSectionId
);

define_id!(
    /// Strongly-typed ID for Subject entities.
    SubjectId
);

define_id!(
    /// Strongly-typed ID for Professor entities.
    ProfessorId
);

define_id!(
    /// Strongly-typed ID for Evaluation entities.
    EvaluationId
);

define_id!(
    /// Strongly-typed ID for EvaluationScore entities.
    EvaluationScoreId
);

define_id!(
    /// Strongly-typed ID for EvaluationType configuration records.
    EvaluationTypeId
);
