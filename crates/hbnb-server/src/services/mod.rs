// Services layer for business logic
// Services own validation and cross-entity rules, calling storage directly
// Decision: One Facade value is built at startup and shared through axum state

pub mod amenity;
pub mod place;
pub mod review;
pub mod user;

pub use amenity::AmenityService;
pub use place::PlaceService;
pub use review::ReviewService;
pub use user::UserService;

use std::sync::Arc;

use crate::storage::{self, StorageBackend};

/// Entry point from route handlers into the service layer
#[derive(Clone)]
pub struct Facade {
    pub users: Arc<UserService>,
    pub places: Arc<PlaceService>,
    pub reviews: Arc<ReviewService>,
    pub amenities: Arc<AmenityService>,
}

impl Facade {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            users: Arc::new(UserService::new(db.clone())),
            places: Arc::new(PlaceService::new(db.clone())),
            reviews: Arc::new(ReviewService::new(db.clone())),
            amenities: Arc::new(AmenityService::new(db)),
        }
    }
}

/// Map a unique-constraint failure to a client-facing validation error
fn unique_or_internal(err: anyhow::Error, constraint: &str, message: &str) -> hbnb_core::Error {
    if storage::is_unique_violation(&err, constraint) {
        hbnb_core::Error::validation(message)
    } else {
        err.into()
    }
}
