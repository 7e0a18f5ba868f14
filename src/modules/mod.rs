pub mod dashboard;
pub mod evaluation_types;
pub mod school_years;
