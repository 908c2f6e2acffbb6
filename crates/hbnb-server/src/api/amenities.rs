// Amenity HTTP routes
// Reads are public; writes need the admin claim.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use hbnb_core::Amenity;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{
    parse_json, ApiError, ApiJson, ApiPath, ErrorResponse, ListResponse, MessageResponse,
};
use crate::auth::AdminUser;
use crate::services::Facade;
use crate::AppState;

/// Request to create an amenity
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAmenityRequest {
    #[schema(example = "WiFi")]
    pub name: String,
}

/// Request to update an amenity
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAmenityRequest {
    pub name: Option<String>,
}

/// Create amenity routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/amenities", get(list_amenities).post(create_amenity))
        .route("/amenities/", get(list_amenities).post(create_amenity))
        .route(
            "/amenities/:amenity_id",
            get(get_amenity).put(update_amenity).delete(delete_amenity),
        )
        .with_state(state)
}

/// POST /amenities - Create an amenity (admin only)
#[utoipa::path(
    post,
    path = "/amenities",
    request_body = CreateAmenityRequest,
    responses(
        (status = 201, description = "Amenity created", body = Amenity),
        (status = 400, description = "Invalid input or amenity already exists", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "amenities"
)]
pub async fn create_amenity(
    State(facade): State<Facade>,
    _admin: AdminUser,
    ApiJson(req): ApiJson<CreateAmenityRequest>,
) -> Result<(StatusCode, Json<Amenity>), ApiError> {
    let amenity = facade.amenities.create(req).await?;
    Ok((StatusCode::CREATED, Json(amenity)))
}

/// GET /amenities - List all amenities
#[utoipa::path(
    get,
    path = "/amenities",
    responses(
        (status = 200, description = "List of amenities", body = ListResponse<Amenity>)
    ),
    tag = "amenities"
)]
pub async fn list_amenities(
    State(facade): State<Facade>,
) -> Result<Json<ListResponse<Amenity>>, ApiError> {
    let amenities = facade.amenities.list().await?;
    Ok(Json(ListResponse::new(amenities)))
}

/// GET /amenities/{amenity_id} - Get an amenity
#[utoipa::path(
    get,
    path = "/amenities/{amenity_id}",
    params(
        ("amenity_id" = Uuid, Path, description = "Amenity ID")
    ),
    responses(
        (status = 200, description = "Amenity found", body = Amenity),
        (status = 404, description = "Amenity not found", body = ErrorResponse)
    ),
    tag = "amenities"
)]
pub async fn get_amenity(
    State(facade): State<Facade>,
    ApiPath(amenity_id): ApiPath<Uuid>,
) -> Result<Json<Amenity>, ApiError> {
    let amenity = facade
        .amenities
        .get(amenity_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Amenity not found"))?;

    Ok(Json(amenity))
}

/// PUT /amenities/{amenity_id} - Rename an amenity (admin only)
#[utoipa::path(
    put,
    path = "/amenities/{amenity_id}",
    params(
        ("amenity_id" = Uuid, Path, description = "Amenity ID")
    ),
    request_body = UpdateAmenityRequest,
    responses(
        (status = 200, description = "Amenity updated", body = Amenity),
        (status = 400, description = "Invalid input or amenity already exists", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Amenity not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "amenities"
)]
pub async fn update_amenity(
    State(facade): State<Facade>,
    _admin: AdminUser,
    ApiPath(amenity_id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<Json<Amenity>, ApiError> {
    if facade.amenities.get(amenity_id).await?.is_none() {
        return Err(ApiError::not_found("Amenity not found"));
    }

    let req: UpdateAmenityRequest = parse_json(&body)?;
    let amenity = facade
        .amenities
        .update(amenity_id, req)
        .await?
        .ok_or_else(|| ApiError::not_found("Amenity not found"))?;

    Ok(Json(amenity))
}

/// DELETE /amenities/{amenity_id} - Delete an amenity (admin only)
#[utoipa::path(
    delete,
    path = "/amenities/{amenity_id}",
    params(
        ("amenity_id" = Uuid, Path, description = "Amenity ID")
    ),
    responses(
        (status = 200, description = "Amenity deleted", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Amenity not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "amenities"
)]
pub async fn delete_amenity(
    State(facade): State<Facade>,
    _admin: AdminUser,
    ApiPath(amenity_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !facade.amenities.delete(amenity_id).await? {
        return Err(ApiError::not_found("Amenity not found"));
    }

    Ok(Json(MessageResponse::new("Amenity deleted successfully")))
}
