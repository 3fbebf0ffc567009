//! Record store trait abstraction.

use async_trait::async_trait;
use rollbook_core::{FieldError, RollNo, Student};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// Both kinds leave the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Input is invalid for the operation (duplicate key, bad field)
    #[error("{0}")]
    Validation(String),

    /// Referenced key does not exist
    #[error("{0}")]
    NotFound(String),
}

impl StoreError {
    /// Key is already taken.
    pub fn duplicate(roll_no: RollNo) -> Self {
        Self::Validation(format!("Duplicate roll number: {}", roll_no))
    }

    /// Key is absent.
    pub fn not_found(roll_no: RollNo) -> Self {
        Self::NotFound(format!("Roll no {} not found.", roll_no))
    }

    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    /// Whether this is a missing-key failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<FieldError> for StoreError {
    fn from(e: FieldError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Store of student records keyed by roll number.
///
/// Implementations serialize every operation; each one is atomic with
/// respect to the others.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new student. Fails if the roll number is taken.
    async fn add(&self, student: Student) -> Result<()>;

    /// Remove a student, returning the removed record.
    async fn delete(&self, roll_no: RollNo) -> Result<Student>;

    /// Replace the record stored at `roll_no` entirely.
    async fn update(&self, roll_no: RollNo, student: Student) -> Result<()>;

    /// Look up a student.
    async fn search(&self, roll_no: RollNo) -> Result<Student>;

    /// All students, ordered by roll number.
    async fn list_all(&self) -> Vec<Student>;
}
