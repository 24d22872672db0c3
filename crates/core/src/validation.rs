//! Input validation helpers invoked by the transport layer.
//!
//! These cover payload shape only (lengths, enumerations). Referential
//! and uniqueness invariants depend on other rows and are enforced by
//! the repositories at write time.

use crate::error::CoreError;

/// Minimum length for person, house, and subject names.
pub const MIN_NAME_LEN: usize = 2;

/// Validate that a required name field has at least [`MIN_NAME_LEN`]
/// characters.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() < MIN_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must have at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(())
}
