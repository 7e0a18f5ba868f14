//! Evaluation types module.
//!
//! Read access to the grading catalog that school years reference.

pub mod controller;
pub mod router;
