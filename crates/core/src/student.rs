//! Student model - the record held by the store.

use serde::Serialize;
use crate::grade::Grade;
use crate::id::RollNo;

/// Lowest accepted mark.
pub const MIN_MARKS: f64 = 0.0;

/// Highest accepted mark.
pub const MAX_MARKS: f64 = 100.0;

/// A student record.
///
/// Immutable once built: the grade is derived from the marks in [`Student::new`]
/// and there are no setters. Any change means building a new `Student`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    roll_no: RollNo,
    name: String,
    email: String,
    course: String,
    marks: f64,
    grade: Grade,
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// A required text field is empty or whitespace
    #[error("{0} cannot be empty.")]
    Empty(&'static str),

    /// Marks outside `[0, 100]` (or not a number)
    #[error("Marks must be 0-100, got {0}.")]
    MarksOutOfRange(f64),
}

impl Student {
    /// Build a student, deriving the grade from `marks`.
    ///
    /// No validation happens here; see [`Student::validate`].
    pub fn new(
        roll_no: impl Into<RollNo>,
        name: impl Into<String>,
        email: impl Into<String>,
        course: impl Into<String>,
        marks: f64,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            email: email.into(),
            course: course.into(),
            marks,
            grade: Grade::from_marks(marks),
        }
    }

    /// Roll number
    pub fn roll_no(&self) -> RollNo {
        self.roll_no
    }

    /// Name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Course
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Marks
    pub fn marks(&self) -> f64 {
        self.marks
    }

    /// Grade derived at construction
    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// Check that text fields are non-empty and marks are within range.
    pub fn validate(&self) -> Result<(), FieldError> {
        for (field, value) in [("Name", &self.name), ("Email", &self.email), ("Course", &self.course)] {
            if value.trim().is_empty() {
                return Err(FieldError::Empty(field));
            }
        }
        check_marks(self.marks)?;
        Ok(())
    }
}

/// Accept `marks` only if it lies in `[MIN_MARKS, MAX_MARKS]`.
pub fn check_marks(marks: f64) -> Result<f64, FieldError> {
    if (MIN_MARKS..=MAX_MARKS).contains(&marks) {
        Ok(marks)
    } else {
        Err(FieldError::MarksOutOfRange(marks))
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Roll No: {}", self.roll_no)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Course: {}", self.course)?;
        // Debug keeps the decimal point on whole numbers (80.0, not 80)
        writeln!(f, "Marks: {:?}", self.marks)?;
        writeln!(f, "Grade: {}", self.grade)?;
        write!(f, "-------------------------")
    }
}
