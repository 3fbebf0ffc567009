//! Parsing of individual menu inputs.

use rollbook_core::{check_marks, RollNo};

/// A line the user typed could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidInput(pub String);

/// Trimmed, non-empty text.
pub fn parse_text(line: &str) -> Result<String, InvalidInput> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InvalidInput("Field cannot be empty.".to_string()));
    }
    Ok(line.to_string())
}

/// Integer roll number.
pub fn parse_roll_no(line: &str) -> Result<RollNo, InvalidInput> {
    line.parse::<RollNo>()
        .map_err(|_| InvalidInput("Invalid integer input.".to_string()))
}

/// Decimal marks in `[0, 100]`.
pub fn parse_marks(line: &str) -> Result<f64, InvalidInput> {
    let marks: f64 = line
        .trim()
        .parse()
        .map_err(|_| InvalidInput("Invalid decimal input.".to_string()))?;
    check_marks(marks).map_err(|_| InvalidInput("Marks must be 0-100.".to_string()))
}
