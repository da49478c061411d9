//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use shared::{PosError, PosResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, inventory item, category, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (order note, line note, item description)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: units, suppliers, phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> PosResult<()> {
    if value.trim().is_empty() {
        return Err(PosError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(PosError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> PosResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(PosError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that an amount (cents or count) is not negative.
pub fn validate_non_negative(value: i64, field: &str) -> PosResult<()> {
    if value < 0 {
        return Err(PosError::validation(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Margherita", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("no onions".into()), "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(501)), "note", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(0, "price").is_ok());
        assert!(validate_non_negative(100, "price").is_ok());
        assert!(validate_non_negative(-1, "price").is_err());
    }
}
