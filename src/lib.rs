//! # Yearbook API
//!
//! A REST API built with Rust and Axum for managing school years and
//! computing their dashboard reports.
//!
//! ## Overview
//!
//! - **School year lifecycle**: draft → active (terms 1 to 3) → finished,
//!   with at most one active and one current year at any time
//! - **Record sync**: the hosting platform pushes each year's sections,
//!   enrollments, professors, evaluations and scores
//! - **Dashboard**: counts, approval rates, top students, professor
//!   workload, difficult subjects and per-level tabs
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── modules/
//! │   ├── school_years/      # Lifecycle endpoints and record sync
//! │   ├── dashboard/         # Report endpoints
//! │   └── evaluation_types/  # Grading catalog
//! ├── store.rs               # In-memory record store with JSON persistence
//! ├── state.rs               # Shared application state
//! ├── router.rs              # Main application router
//! ├── docs.rs                # OpenAPI documentation
//! └── validator.rs           # Validated JSON extractor
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin yearbook-cli -- seed --output storage/dataset.json
//! YEARBOOK_DATASET=storage/dataset.json cargo run
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`, and
//! Prometheus metrics at `/metrics`.

pub mod docs;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod validator;

// Re-export workspace crates for convenience
pub use yearbook_config;
pub use yearbook_core;
pub use yearbook_models;
pub use yearbook_reports;
