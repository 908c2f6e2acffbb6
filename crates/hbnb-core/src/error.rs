// Error types for HBnB services

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the service layer.
///
/// Each variant corresponds to one response class at the HTTP boundary.
/// `Internal` carries the underlying cause for server-side logging only.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a field rule or references something invalid
    #[error("{0}")]
    Validation(String),

    /// The addressed entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// The caller is authenticated but not allowed to do this
    #[error("{0}")]
    Forbidden(String),

    /// Storage or other unexpected failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Error::Forbidden(msg.into())
    }

    /// Whether the message is safe to show to API clients
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Error::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::validation("Email already registered").to_string(),
            "Email already registered"
        );
        assert_eq!(Error::not_found("Place not found").to_string(), "Place not found");
    }

    #[test]
    fn test_internal_error_is_hidden() {
        let err: Error = anyhow::anyhow!("connection refused").into();
        assert!(!err.is_user_visible());
        assert!(Error::forbidden("nope").is_user_visible());
    }
}
