// Review HTTP routes
// Decision: Review mutation is author-only; the admin claim does not override it

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use hbnb_core::Review;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{
    parse_json, ApiError, ApiJson, ApiPath, ErrorResponse, ListResponse, MessageResponse,
};
use crate::auth::{guard, AdminUser, AuthUser};
use crate::services::Facade;
use crate::AppState;

/// Request to create a review
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    #[schema(example = "Spotless and quiet")]
    pub text: String,
    /// Rating from 1 to 5
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    /// Required on POST /reviews; taken from the path on the nested route
    #[serde(default)]
    pub place_id: Option<Uuid>,
}

/// Request to update a review. Only text and rating can change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: Option<i32>,
}

/// Create review routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/reviews/", get(list_reviews).post(create_review))
        .route(
            "/reviews/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
        .with_state(state)
}

/// POST /reviews - Create a review as the caller
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid input, own place, or already reviewed", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn create_review(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let place_id = req
        .place_id
        .ok_or_else(|| ApiError::bad_request("place_id is required"))?;

    let review = facade.reviews.create(caller.id, place_id, req).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /reviews - List all reviews (admin only)
#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "List of reviews", body = ListResponse<Review>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(facade): State<Facade>,
    _admin: AdminUser,
) -> Result<Json<ListResponse<Review>>, ApiError> {
    let reviews = facade.reviews.list().await?;
    Ok(Json(ListResponse::new(reviews)))
}

/// GET /reviews/{review_id} - Get a review
#[utoipa::path(
    get,
    path = "/reviews/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn get_review(
    State(facade): State<Facade>,
    _caller: AuthUser,
    ApiPath(review_id): ApiPath<Uuid>,
) -> Result<Json<Review>, ApiError> {
    let review = facade
        .reviews
        .get(review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(review))
}

/// PUT /reviews/{review_id} - Update a review (author only)
#[utoipa::path(
    put,
    path = "/reviews/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn update_review(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(review_id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<Json<Review>, ApiError> {
    let review = facade
        .reviews
        .get(review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    guard::require_author(&caller, &review)?;

    let req: UpdateReviewRequest = parse_json(&body)?;
    let updated = facade
        .reviews
        .update(review_id, req)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(updated))
}

/// DELETE /reviews/{review_id} - Delete a review (author only)
#[utoipa::path(
    delete,
    path = "/reviews/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn delete_review(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(review_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let review = facade
        .reviews
        .get(review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    guard::require_author(&caller, &review)?;

    if !facade.reviews.delete(review_id).await? {
        return Err(ApiError::not_found("Review not found"));
    }

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
