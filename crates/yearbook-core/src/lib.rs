//! # Yearbook Core
//!
//! Core types, errors, and utilities for the Yearbook API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination parameters and metadata for list endpoints
//! - [`math`]: Rounding and percentage helpers shared by the report builders
//!
//! # Example
//!
//! ```ignore
//! use yearbook_core::errors::AppError;
//! use yearbook_core::math::{percentage, round2};
//!
//! let error = AppError::not_found(anyhow::anyhow!("School year not found"));
//! assert_eq!(percentage(1, 4), 25.0);
//! assert_eq!(round2(13.456), 13.46);
//! ```

pub mod errors;
pub mod math;
pub mod pagination;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams, paginate};
