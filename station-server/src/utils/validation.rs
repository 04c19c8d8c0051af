//! Input validation helpers for the CRUD handlers

use shared::error::{AppError, ErrorCode};

/// Station and employee names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords before hashing
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MAX_ADDRESS_LEN: usize = 500;

/// Image paths
pub const MAX_URL_LEN: usize = 2048;

/// Years attendance may be recorded for
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Required string: non-blank and within `max_len`
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_len(value, field, max_len)
}

/// Optional string: within `max_len` when present
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid email address: {}", email),
        )
        .with_detail("field", "email"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    validate_len(password, "password", MAX_PASSWORD_LEN)
}

/// Year window for plans and attendance
pub fn validate_year(year: i32) -> Result<(), AppError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"),
        )
        .with_detail("year", year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Nord", "name", MAX_NAME_LEN).is_ok());
        assert_eq!(
            validate_required_text("  ", "name", MAX_NAME_LEN)
                .unwrap_err()
                .code,
            ErrorCode::RequiredField
        );
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(None, "phone", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("jean.dupont@station.fr").is_ok());
        for bad in ["jean", "@station.fr", "jean@station", "jean@@station.fr", "jean@.fr"] {
            assert!(validate_email(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_password_length() {
        assert_eq!(
            validate_password("abc").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert!(validate_password("abcdef").is_ok());
    }

    #[test]
    fn test_year_window() {
        assert!(validate_year(2000).is_ok());
        assert!(validate_year(2100).is_ok());
        assert_eq!(validate_year(1999).unwrap_err().code, ErrorCode::ValueOutOfRange);
        assert!(validate_year(2101).is_err());
    }
}
