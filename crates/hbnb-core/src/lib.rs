// HBnB Core
//
// Domain entities shared by the API server and its storage layer.
//
// Key design decisions:
// - Entities are DB-agnostic; storage rows are mapped into them by services
// - Field rules (lengths, ranges, formats) are defined once in `validation`
// - A single `Error` type carries the outcome classes the API maps to status codes

pub mod amenity;
pub mod error;
pub mod place;
pub mod review;
pub mod telemetry;
pub mod user;
pub mod validation;

pub use amenity::Amenity;
pub use error::{Error, Result};
pub use place::Place;
pub use review::Review;
pub use user::User;
