//! Unique identifiers for Rollbook entities.

use serde::Serialize;

/// Roll number identifying a Student within the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RollNo(i32);

impl RollNo {
    /// Wrap a raw roll number
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw roll number
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for RollNo {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RollNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for RollNo {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
