//! Character role constants and conversions.

use crate::error::CoreError;

/// A character attending classes.
pub const ROLE_STUDENT: &str = "student";
/// A character teaching classes.
pub const ROLE_TEACHER: &str = "teacher";

/// All valid character roles.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_TEACHER];

/// Character role enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterRole {
    Student,
    Teacher,
}

impl CharacterRole {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Teacher => ROLE_TEACHER,
        }
    }

    /// Parse from a string, returning an error for unknown roles.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_STUDENT => Ok(Self::Student),
            ROLE_TEACHER => Ok(Self::Teacher),
            other => Err(CoreError::Validation(format!(
                "Unknown role: '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    CharacterRole::from_str(role).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_as_str() {
        assert_eq!(CharacterRole::Student.as_str(), "student");
        assert_eq!(CharacterRole::Teacher.as_str(), "teacher");
    }

    #[test]
    fn role_from_str_valid() {
        assert_eq!(
            CharacterRole::from_str("student").unwrap(),
            CharacterRole::Student
        );
        assert_eq!(
            CharacterRole::from_str("teacher").unwrap(),
            CharacterRole::Teacher
        );
    }

    #[test]
    fn role_from_str_invalid() {
        assert!(CharacterRole::from_str("ghost").is_err());
        assert!(CharacterRole::from_str("").is_err());
        assert!(CharacterRole::from_str("Student").is_err());
    }

    #[test]
    fn validate_role_matches_parse() {
        assert!(validate_role("student").is_ok());
        assert!(validate_role("prefect").is_err());
    }
}
