//! Dataset generation.
//!
//! Builds one active school year with sections for every level, two
//! technical mentions, professors, students, evaluations and scores. All
//! derived summaries and section stats are computed from the drawn values.

mod evaluations;
mod models;
mod stats;
mod structure;
mod students;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use yearbook_models::ids::EvaluationTypeId;
use yearbook_models::school_years::start_year;
use yearbook_models::{CreateSchoolYearDto, Dataset, EvaluationType, SchoolYear, YearRecords};

pub use models::SeedConfig;
pub use structure::{MentionPlan, YearStructure, generate_structure};
pub use students::{GeneratedStudent, generate_students};

const YEAR_NAME: &str = "2025-2026";

fn year_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 8).unwrap_or_default()
}

/// Generates a complete dataset with one active year in its second term.
pub fn generate_dataset(config: &SeedConfig) -> Dataset {
    let start_time = Instant::now();
    let now = Utc::now();
    let catalog = EvaluationType::default_catalog();

    let mut years = vec![SchoolYear::new(
        CreateSchoolYearDto {
            name: YEAR_NAME.to_string(),
            evaluation_type_secondary: EvaluationTypeId::from_u128(1),
            evaluation_type_primary: EvaluationTypeId::from_u128(3),
            evaluation_type_preschool: EvaluationTypeId::from_u128(5),
        },
        now,
    )];
    let year_id = years[0].id;
    if let Err(e) = start_year(&mut years, year_id, year_start(), now) {
        eprintln!("   ⚠️  Could not start {YEAR_NAME}: {e}");
    }
    if let Err(e) = years[0].advance_term(now) {
        eprintln!("   ⚠️  Could not advance {YEAR_NAME}: {e}");
    }
    let grading = years[0].grading_config(&catalog);

    println!("🏫 Building {} sections and {} professors...", config.total_sections(), config.professors);
    let mut structure = generate_structure(config);

    println!("🎓 Generating {} students...", config.total_students());
    let students = generate_students(
        &structure.sections,
        config.students_per_section,
        &structure.mentions,
        config.mention_ratio,
        &grading,
    );
    stats::fill_section_stats(&mut structure.sections, &students);
    stats::fill_mention_stats(&mut structure.mention_sections, &students);

    println!("📝 Generating evaluations...");
    let (evaluations, scores) = evaluations::generate_evaluations(
        &structure.sections,
        &structure.professors,
        &structure.subjects,
        &students,
        config.evaluations_per_section,
        &grading,
        year_start(),
    );

    let records = YearRecords {
        sections: structure.sections,
        mention_sections: structure.mention_sections,
        enrollments: students.into_iter().map(|s| s.enrollment).collect(),
        professors: structure.professors,
        subjects: structure.subjects,
        evaluations,
        scores,
    };
    println!(
        "   ✓ Generated {} records in {:?}",
        records.total_records(),
        start_time.elapsed()
    );

    let mut dataset = Dataset {
        evaluation_types: catalog,
        school_years: years,
        ..Default::default()
    };
    dataset.records.insert(year_id, records);
    dataset
}

/// Writes `dataset` as pretty JSON, creating parent directories.
pub fn write_dataset(path: impl AsRef<Path>, dataset: &Dataset) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(dataset).context("Failed to serialize dataset")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Summary line printed after a successful seed.
pub fn describe(dataset: &Dataset) -> String {
    let records: usize = dataset.records.values().map(YearRecords::total_records).sum();
    let year = dataset
        .school_years
        .iter()
        .find(|y| y.current)
        .map(|y| format!("{} (term {})", y.name, y.term))
        .unwrap_or_else(|| "no current year".to_string());
    format!("{year}, {records} records")
}
