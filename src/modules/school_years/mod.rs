//! School years module.
//!
//! Lifecycle of a school year (create, start, advance term, finish,
//! delete) and the sync endpoint that replaces its records.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
