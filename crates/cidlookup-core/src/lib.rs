//! cidlookup Core
//!
//! Core types and utilities shared across the cidlookup crates.
//!
//! This crate provides:
//! - Course records with their normalized matching keys
//! - The CSV dataset loader and its validation errors
//! - Result sets with deduplication and home-first ordering

pub mod dataset;
pub mod error;
pub mod result_set;
pub mod types;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use result_set::ResultSet;
pub use types::{
    first_course_number, CourseCode, CourseRecord, HomeInstitution, REQUIRED_COLUMNS,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dataset::Dataset;
    pub use crate::error::{Error, Result};
    pub use crate::result_set::ResultSet;
    pub use crate::types::{CourseCode, CourseRecord, HomeInstitution};
}
