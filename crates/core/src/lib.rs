//! Rollbook core data models.
//!
//! This crate defines the student record and the small value types
//! it is built from.

#![warn(missing_docs)]

// Identity
mod id;

// Record
mod grade;
mod student;

// Re-exports
pub use id::RollNo;
pub use grade::Grade;
pub use student::{Student, FieldError, check_marks, MIN_MARKS, MAX_MARKS};
