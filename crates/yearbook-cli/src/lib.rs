//! # Yearbook CLI
//!
//! Development dataset generation for the Yearbook API.
//!
//! ## Usage
//!
//! ```ignore
//! use yearbook_cli::seeder::{SeedConfig, generate_dataset, write_dataset};
//!
//! let dataset = generate_dataset(&SeedConfig::default());
//! write_dataset("storage/dataset.json", &dataset)?;
//! ```

pub mod seeder;
