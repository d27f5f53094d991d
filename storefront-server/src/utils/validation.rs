//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied at the handler/service boundary.

use crate::utils::AppError;

// =============================================================================
// Text length limits
// =============================================================================

/// Entity names: product, category, user
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and free text
pub const MAX_TEXT_LEN: usize = 2000;

/// Short identifiers: sku, brand, config keys
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// =============================================================================
// Validation helpers
// =============================================================================

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
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
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Pala", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn optional_text_checks_length_only_when_present() {
        assert!(validate_optional_text(&None, "sku", 4).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "sku", 4).is_ok());
        assert!(validate_optional_text(&Some("too long".into()), "sku", 4).is_err());
    }
}
