use thiserror::Error;

use crate::model::{MAX_GRADE, MIN_GRADE};

/// A rejected dialog answer. The message is shown verbatim on the re-prompt,
/// so every variant renders as something an operator can act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be blank")]
    Blank(&'static str),
    #[error("Course initials must be 1 to 3 letters")]
    InvalidInitials,
    #[error("Name already registered")]
    DuplicateName,
    #[error("Grade must be between 0 and 10")]
    GradeOutOfRange,
    #[error("Student already enrolled in this discipline")]
    AlreadyEnrolled,
}

pub fn require_non_blank(field: &'static str, input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

/// Course initials feed the generated registration number: 1 to 3 ASCII
/// letters, upper-cased later by the registry.
pub fn validate_initials(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank("Course initials"));
    }
    if trimmed.len() > 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidInitials);
    }
    Ok(())
}

pub fn validate_grade(value: f64) -> Result<(), ValidationError> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        return Err(ValidationError::GradeOutOfRange);
    }
    Ok(())
}
