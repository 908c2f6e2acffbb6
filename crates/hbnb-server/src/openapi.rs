// OpenAPI specification generation
//
// Shared by the server (Swagger UI) and the export-openapi binary.

use hbnb_core::{Amenity, Place, Review, User};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::{self, ErrorResponse, ListResponse, MessageResponse};
use crate::auth;

/// OpenAPI documentation for the HBnB API
#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api/v1", description = "Default API prefix"),
    ),
    paths(
        auth::routes::login,
        auth::routes::register,
        auth::routes::protected,
        api::users::create_user,
        api::users::list_users,
        api::users::get_user,
        api::users::update_user,
        api::places::create_place,
        api::places::list_places,
        api::places::get_place,
        api::places::update_place,
        api::places::delete_place,
        api::places::list_place_reviews,
        api::places::create_place_review,
        api::reviews::create_review,
        api::reviews::list_reviews,
        api::reviews::get_review,
        api::reviews::update_review,
        api::reviews::delete_review,
        api::amenities::create_amenity,
        api::amenities::list_amenities,
        api::amenities::get_amenity,
        api::amenities::update_amenity,
        api::amenities::delete_amenity,
    ),
    components(
        schemas(
            User, Place, Review, Amenity,
            ErrorResponse, MessageResponse,
            ListResponse<User>,
            ListResponse<Place>,
            ListResponse<Review>,
            ListResponse<Amenity>,
            auth::routes::LoginRequest,
            auth::routes::RegisterRequest,
            auth::routes::TokenResponse,
            auth::routes::ProtectedResponse,
            api::users::CreateUserRequest, api::users::UpdateUserRequest,
            api::places::CreatePlaceRequest, api::places::UpdatePlaceRequest,
            api::reviews::CreateReviewRequest, api::reviews::UpdateReviewRequest,
            api::amenities::CreateAmenityRequest, api::amenities::UpdateAmenityRequest,
        )
    ),
    tags(
        (name = "auth", description = "Login, registration and token check"),
        (name = "users", description = "User management endpoints"),
        (name = "places", description = "Place listings and their reviews"),
        (name = "reviews", description = "Review management endpoints"),
        (name = "amenities", description = "Amenity catalogue")
    ),
    info(
        title = "HBnB API",
        version = "0.1.0",
        description = "Users, places, reviews and amenities for a short-term rental service",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}

/// Registers the bearer scheme referenced by `security(("bearer_auth" = []))`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /auth/login or /auth/register"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_routes_and_security() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();

        assert_eq!(json["info"]["title"], "HBnB API");
        assert!(json["paths"]["/auth/login"]["post"].is_object());
        assert!(json["paths"]["/places/{place_id}/reviews"]["get"].is_object());
        assert!(json["paths"]["/amenities/{amenity_id}"]["delete"].is_object());
        assert!(json["components"]["securitySchemes"]["bearer_auth"].is_object());
    }
}
