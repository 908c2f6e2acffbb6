// Place CRUD HTTP routes, plus the nested review collection of a place

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use hbnb_core::{Place, Review};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{
    parse_json, ApiError, ApiJson, ApiPath, ErrorResponse, ListResponse, MessageResponse,
};
use super::reviews::CreateReviewRequest;
use crate::auth::{guard, AuthUser};
use crate::services::Facade;
use crate::AppState;

/// Request to create a place. The owner is always the caller.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePlaceRequest {
    #[schema(example = "Cozy loft near the harbour")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price per night, non-negative
    #[schema(example = 120.0)]
    pub price: f64,
    #[schema(example = 43.296)]
    pub latitude: f64,
    #[schema(example = 5.37)]
    pub longitude: f64,
    /// Amenity IDs to link
    #[serde(default)]
    pub amenities: Vec<Uuid>,
}

/// Request to update a place. Only provided fields will be updated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePlaceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Replaces the full amenity set when present
    pub amenities: Option<Vec<Uuid>>,
}

/// Create place routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/places", get(list_places).post(create_place))
        .route("/places/", get(list_places).post(create_place))
        .route(
            "/places/:place_id",
            get(get_place).put(update_place).delete(delete_place),
        )
        .route(
            "/places/:place_id/reviews",
            get(list_place_reviews).post(create_place_review),
        )
        .with_state(state)
}

/// POST /places - Create a place owned by the caller
#[utoipa::path(
    post,
    path = "/places",
    request_body = CreatePlaceRequest,
    responses(
        (status = 201, description = "Place created", body = Place),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn create_place(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<Place>), ApiError> {
    let place = facade.places.create(caller.id, req).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

/// GET /places - List all places
#[utoipa::path(
    get,
    path = "/places",
    responses(
        (status = 200, description = "List of places", body = ListResponse<Place>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn list_places(
    State(facade): State<Facade>,
) -> Result<Json<ListResponse<Place>>, ApiError> {
    let places = facade.places.list().await?;
    Ok(Json(ListResponse::new(places)))
}

/// GET /places/{place_id} - Get a place
#[utoipa::path(
    get,
    path = "/places/{place_id}",
    params(
        ("place_id" = Uuid, Path, description = "Place ID")
    ),
    responses(
        (status = 200, description = "Place found", body = Place),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn get_place(
    State(facade): State<Facade>,
    ApiPath(place_id): ApiPath<Uuid>,
) -> Result<Json<Place>, ApiError> {
    let place = facade
        .places
        .get(place_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Place not found"))?;

    Ok(Json(place))
}

/// PUT /places/{place_id} - Update a place (owner or admin)
#[utoipa::path(
    put,
    path = "/places/{place_id}",
    params(
        ("place_id" = Uuid, Path, description = "Place ID")
    ),
    request_body = UpdatePlaceRequest,
    responses(
        (status = 200, description = "Place updated", body = Place),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn update_place(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(place_id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<Json<Place>, ApiError> {
    let place = facade
        .places
        .get(place_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Place not found"))?;

    guard::require_owner_or_admin(&caller, &place)?;

    let req: UpdatePlaceRequest = parse_json(&body)?;
    let updated = facade
        .places
        .update(place_id, req)
        .await?
        .ok_or_else(|| ApiError::not_found("Place not found"))?;

    Ok(Json(updated))
}

/// DELETE /places/{place_id} - Delete a place and its reviews (owner or admin)
#[utoipa::path(
    delete,
    path = "/places/{place_id}",
    params(
        ("place_id" = Uuid, Path, description = "Place ID")
    ),
    responses(
        (status = 200, description = "Place deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn delete_place(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(place_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let place = facade
        .places
        .get(place_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Place not found"))?;

    guard::require_owner_or_admin(&caller, &place)?;

    if !facade.places.delete(place_id).await? {
        return Err(ApiError::not_found("Place not found"));
    }

    Ok(Json(MessageResponse::new("Place deleted successfully")))
}

/// GET /places/{place_id}/reviews - List reviews of a place
#[utoipa::path(
    get,
    path = "/places/{place_id}/reviews",
    params(
        ("place_id" = Uuid, Path, description = "Place ID")
    ),
    responses(
        (status = 200, description = "Reviews of the place", body = ListResponse<Review>),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn list_place_reviews(
    State(facade): State<Facade>,
    ApiPath(place_id): ApiPath<Uuid>,
) -> Result<Json<ListResponse<Review>>, ApiError> {
    let reviews = facade.reviews.list_for_place(place_id).await?;
    Ok(Json(ListResponse::new(reviews)))
}

/// POST /places/{place_id}/reviews - Review a place as the caller
#[utoipa::path(
    post,
    path = "/places/{place_id}/reviews",
    params(
        ("place_id" = Uuid, Path, description = "Place ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid input, own place, or already reviewed", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn create_place_review(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(place_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = facade.reviews.create(caller.id, place_id, req).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
