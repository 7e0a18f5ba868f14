//! JSON form of a complete store: catalog, years and per-year records.
//!
//! Written by the seeding CLI and read by the API at startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grading::EvaluationType;
use crate::ids::SchoolYearId;
use crate::records::YearRecords;
use crate::school_years::{SchoolYear, YearState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "EvaluationType::default_catalog")]
    pub evaluation_types: Vec<EvaluationType>,
    #[serde(default)]
    pub school_years: Vec<SchoolYear>,
    /// Keyed by school year id. Years without an entry have no records.
    #[serde(default)]
    pub records: HashMap<SchoolYearId, YearRecords>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            evaluation_types: EvaluationType::default_catalog(),
            school_years: Vec::new(),
            records: HashMap::new(),
        }
    }
}

impl Dataset {
    /// Lists the rules a loaded dataset breaks. Empty means consistent.
    ///
    /// Checks the single current / single active invariant and that every
    /// records entry belongs to a known year.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let current = self.school_years.iter().filter(|y| y.current).count();
        if current > 1 {
            problems.push(format!("{current} school years are marked current"));
        }
        let active = self
            .school_years
            .iter()
            .filter(|y| y.state == YearState::Active)
            .count();
        if active > 1 {
            problems.push(format!("{active} school years are active"));
        }
        for id in self.records.keys() {
            if !self.school_years.iter().any(|y| y.id == *id) {
                problems.push(format!("records reference unknown school year {id}"));
            }
        }

        problems
    }
}
