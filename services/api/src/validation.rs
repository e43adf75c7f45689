//! Input validation utilities
//!
//! Validation happens before any database access; failures surface to the
//! client as structured 422 responses.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum accepted display-name length
const MAX_NAME_LEN: usize = 100;

/// Validate a registration form
pub fn validate_registration(
    email: &str,
    name: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), String> {
    validate_email(email)?;

    if name.is_empty() {
        return Err("Name is required".to_string());
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {} characters long", MAX_NAME_LEN));
    }

    if password.is_empty() || password_confirm.is_empty() {
        return Err("Password is required".to_string());
    }

    if password != password_confirm {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration("alice@example.com", "alice", "pw123", "pw123").is_ok());
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(validate_registration("", "alice", "pw123", "pw123").is_err());
        assert!(validate_registration("alice@example.com", "", "pw123", "pw123").is_err());
        assert!(validate_registration("alice@example.com", "alice", "", "").is_err());
        assert!(validate_registration("alice@example.com", "alice", "pw123", "").is_err());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        assert!(validate_registration("alice@example.com", "alice", "pw123", "pw124").is_err());
    }

    #[test]
    fn test_overlong_name_rejected() {
        let name = "a".repeat(101);
        assert!(validate_registration("alice@example.com", &name, "pw123", "pw123").is_err());

        let name = "a".repeat(100);
        assert!(validate_registration("alice@example.com", &name, "pw123", "pw123").is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }
}
