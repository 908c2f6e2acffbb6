// User HTTP routes
// Decision: Users are never deleted; there is no DELETE route

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use hbnb_core::User;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{parse_json, ApiError, ApiJson, ApiPath, ErrorResponse, ListResponse};
use crate::auth::{guard, AdminUser, AuthError, AuthUser, OptionalAuthUser};
use crate::services::Facade;
use crate::AppState;

/// Request to create a user
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plaintext password, at least 6 characters. Stored only as a hash.
    pub password: String,
    /// Requires an admin token when true.
    #[serde(default)]
    pub is_admin: bool,
}

/// Request to update a user. Only provided fields will be updated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Only admins may change this.
    pub is_admin: Option<bool>,
}

/// Create user routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/:user_id", get(get_user).put(update_user))
        .with_state(state)
}

/// POST /users - Create a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
        (status = 401, description = "Admin creation without a token", body = ErrorResponse),
        (status = 403, description = "Admin creation by a non-admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(facade): State<Facade>,
    OptionalAuthUser(caller): OptionalAuthUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if req.is_admin {
        let caller = caller.ok_or_else(|| AuthError::unauthorized("Authentication required"))?;
        guard::require_admin(&caller)?;
    }

    let user = facade.users.create(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users - List all users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = ListResponse<User>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(facade): State<Facade>,
    _admin: AdminUser,
) -> Result<Json<ListResponse<User>>, ApiError> {
    let users = facade.users.list().await?;
    Ok(Json(ListResponse::new(users)))
}

/// GET /users/{user_id} - Get a user (self or admin)
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = facade
        .users
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    guard::require_self_or_admin(&caller, user.id)?;
    Ok(Json(user))
}

/// PUT /users/{user_id} - Update a user (self or admin)
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(facade): State<Facade>,
    caller: AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let existing = facade
        .users
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    guard::require_self_or_admin(&caller, existing.id)?;

    let req: UpdateUserRequest = parse_json(&body)?;
    if req.is_admin.is_some_and(|flag| flag != existing.is_admin) {
        guard::require_admin(&caller)?;
    }

    let user = facade
        .users
        .update(user_id, req)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user))
}
