// Storage layer for the HBnB server
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// Both backends return anyhow::Result; unique-constraint failures carry a
// typed UniqueViolation that services downcast into validation errors.

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;

/// A write was rejected by a unique constraint
#[derive(Debug, Clone, thiserror::Error)]
#[error("unique constraint violated: {constraint}")]
pub struct UniqueViolation {
    /// Constraint name as declared in the schema (e.g. `users_email_key`)
    pub constraint: String,
}

impl UniqueViolation {
    pub fn new(constraint: impl Into<String>) -> Self {
        Self {
            constraint: constraint.into(),
        }
    }
}

/// Check whether an error came from the named unique constraint
pub fn is_unique_violation(err: &anyhow::Error, constraint: &str) -> bool {
    err.downcast_ref::<UniqueViolation>()
        .is_some_and(|v| v.constraint == constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unique_violation_matches_constraint() {
        let err: anyhow::Error = UniqueViolation::new("users_email_key").into();

        assert!(is_unique_violation(&err, "users_email_key"));
        assert!(!is_unique_violation(&err, "amenities_name_key"));
        assert!(!is_unique_violation(
            &anyhow::anyhow!("connection reset"),
            "users_email_key"
        ));
    }
}
