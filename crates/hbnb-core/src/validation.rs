// Field validation rules
//
// Hard limits applied by services before anything reaches storage.
// Messages are returned to clients verbatim, so they name the field.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// Limits
// =============================================================================

/// Maximum length of first_name / last_name
pub const MAX_NAME_CHARS: usize = 50;

/// Minimum password length
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Maximum password length (argon2 accepts more, but nobody needs it)
pub const MAX_PASSWORD_CHARS: usize = 128;

/// Maximum email length, matching the `users.email` column width
pub const MAX_EMAIL_CHARS: usize = 255;

/// Maximum length of a place title
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum length of a place description or review text
pub const MAX_TEXT_CHARS: usize = 2000;

/// Maximum length of an amenity name
pub const MAX_AMENITY_NAME_CHARS: usize = 50;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

// =============================================================================
// Validation Functions
// =============================================================================

fn require_text(field: &str, value: &str, max_chars: usize) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_chars {
        tracing::warn!(field, max_chars, "Field exceeds limit");
        return Err(Error::validation(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(())
}

/// Validate a first or last name
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    require_text(field, value, MAX_NAME_CHARS)
}

/// Validate an email address format
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(Error::validation(format!(
            "email must be at most {} characters",
            MAX_EMAIL_CHARS
        )));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(Error::validation("Invalid email format"));
    }
    Ok(())
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_CHARS {
        return Err(Error::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    if len > MAX_PASSWORD_CHARS {
        return Err(Error::validation(format!(
            "password must be at most {} characters",
            MAX_PASSWORD_CHARS
        )));
    }
    Ok(())
}

/// Validate a place title
pub fn validate_title(title: &str) -> Result<()> {
    require_text("title", title, MAX_TITLE_CHARS)
}

/// Validate an optional place description
pub fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(desc) = description {
        if desc.chars().count() > MAX_TEXT_CHARS {
            return Err(Error::validation(format!(
                "description must be at most {} characters",
                MAX_TEXT_CHARS
            )));
        }
    }
    Ok(())
}

/// Validate a nightly price
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation("price must be a non-negative number"));
    }
    Ok(())
}

pub fn validate_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::validation("latitude must be between -90 and 90"));
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::validation("longitude must be between -180 and 180"));
    }
    Ok(())
}

/// Validate review text
pub fn validate_review_text(text: &str) -> Result<()> {
    require_text("text", text, MAX_TEXT_CHARS)
}

/// Validate a review rating
pub fn validate_rating(rating: i32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::validation(format!(
            "rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

/// Validate an amenity name
pub fn validate_amenity_name(name: &str) -> Result<()> {
    require_text("name", name, MAX_AMENITY_NAME_CHARS)
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("first_name", "Ada").is_ok());
        assert!(validate_name("first_name", &"x".repeat(MAX_NAME_CHARS)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_name("first_name", "").is_err());
        assert!(validate_name("first_name", "   ").is_err());
        let err = validate_name("last_name", &"x".repeat(MAX_NAME_CHARS + 1)).unwrap_err();
        assert_eq!(err.to_string(), "last_name must be at most 50 characters");
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@x").is_err());
        assert!(validate_email("a b@x.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_email_length() {
        let local = |n: usize| format!("{}@example.com", "a".repeat(n - "@example.com".len()));

        assert!(validate_email(&local(MAX_EMAIL_CHARS)).is_ok());
        let err = validate_email(&local(MAX_EMAIL_CHARS + 1)).unwrap_err();
        assert_eq!(err.to_string(), "email must be at most 255 characters");
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_CHARS + 1)).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(120.5).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.5).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_description_optional() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("")).is_ok());
        assert!(validate_description(Some(&"d".repeat(MAX_TEXT_CHARS + 1))).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
