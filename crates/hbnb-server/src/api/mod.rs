// HTTP API routes
//
// Each submodule handles one resource type. All of them share `AppState` and
// are mounted under the configured API prefix.

pub mod amenities;
pub mod common;
pub mod places;
pub mod reviews;
pub mod users;

pub use common::{ApiError, ErrorResponse, ListResponse, MessageResponse};
