//! Letter grade derived from marks.

use serde::Serialize;

/// Letter grade.
///
/// Thresholds: `>= 90` is A, `>= 75` is B, `>= 60` is C, anything else is D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "char")]
pub enum Grade {
    /// 90 and above
    A,
    /// 75 up to 90
    B,
    /// 60 up to 75
    C,
    /// Below 60
    D,
}

impl Grade {
    /// Derive the grade for a mark.
    pub fn from_marks(marks: f64) -> Self {
        if marks >= 90.0 {
            Grade::A
        } else if marks >= 75.0 {
            Grade::B
        } else if marks >= 60.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    /// Single character form.
    pub fn as_char(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
        }
    }
}

impl From<Grade> for char {
    fn from(grade: Grade) -> Self {
        grade.as_char()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
