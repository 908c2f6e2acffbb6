// Per-resource authorization rules
// Decision: One canonical rule per route; callers run these after the target row is loaded (401, 404, then 403)

use hbnb_core::{Place, Review};
use uuid::Uuid;

use super::middleware::{AuthError, AuthUser};

/// Subject must be the target user, or hold the admin claim
pub fn require_self_or_admin(user: &AuthUser, target_user_id: Uuid) -> Result<(), AuthError> {
    if user.id == target_user_id || user.is_admin {
        Ok(())
    } else {
        Err(AuthError::forbidden("Access denied"))
    }
}

/// Subject must own the place, or hold the admin claim
pub fn require_owner_or_admin(user: &AuthUser, place: &Place) -> Result<(), AuthError> {
    if place.is_owned_by(user.id) || user.is_admin {
        Ok(())
    } else {
        Err(AuthError::forbidden("You can only modify your own places"))
    }
}

/// Subject must have written the review; the admin claim does not override this
pub fn require_author(user: &AuthUser, review: &Review) -> Result<(), AuthError> {
    if review.is_authored_by(user.id) {
        Ok(())
    } else {
        Err(AuthError::forbidden("You can only modify your own reviews"))
    }
}

/// Subject must hold the admin claim
pub fn require_admin(user: &AuthUser) -> Result<(), AuthError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AuthError::forbidden("Admin access required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;

    fn place_owned_by(owner_id: Uuid) -> Place {
        let now = Utc::now();
        Place {
            id: Uuid::now_v7(),
            title: "Hut".to_string(),
            description: None,
            price: 10.0,
            latitude: 0.0,
            longitude: 0.0,
            owner_id,
            amenities: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn review_by(user_id: Uuid) -> Review {
        let now = Utc::now();
        Review {
            id: Uuid::now_v7(),
            text: "Fine".to_string(),
            rating: 3,
            user_id,
            place_id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
        }
    }

    fn user(is_admin: bool) -> AuthUser {
        AuthUser {
            id: Uuid::now_v7(),
            is_admin,
        }
    }

    #[test]
    fn test_self_or_admin() {
        let me = user(false);
        assert!(require_self_or_admin(&me, me.id).is_ok());
        assert!(require_self_or_admin(&user(true), me.id).is_ok());

        let err = require_self_or_admin(&user(false), me.id).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_owner_or_admin() {
        let owner = user(false);
        let place = place_owned_by(owner.id);
        assert!(require_owner_or_admin(&owner, &place).is_ok());
        assert!(require_owner_or_admin(&user(true), &place).is_ok());
        assert!(require_owner_or_admin(&user(false), &place).is_err());
    }

    #[test]
    fn test_author_has_no_admin_override() {
        let author = user(false);
        let review = review_by(author.id);
        assert!(require_author(&author, &review).is_ok());

        let err = require_author(&user(true), &review).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert!(require_author(&user(false), &review).is_err());
    }

    #[test]
    fn test_admin_only() {
        assert!(require_admin(&user(true)).is_ok());
        assert_eq!(
            require_admin(&user(false)).unwrap_err().error,
            "Admin access required"
        );
    }
}
