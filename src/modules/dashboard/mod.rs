//! Dashboard module.
//!
//! Read-only reports over one school year's records.

pub mod controller;
pub mod router;
pub mod service;
