// Authentication HTTP routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use hbnb_core::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::middleware::{AuthError, AuthState, AuthUser};
use crate::api::common::{ApiError, ApiJson, ErrorResponse};
use crate::api::users::CreateUserRequest;
use crate::services::Facade;
use crate::AppState;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Register request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: User,
}

/// Identity echoed back by the protected check endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ProtectedResponse {
    pub message: String,
    pub user_id: Uuid,
    pub is_admin: bool,
    pub user: User,
}

/// Create auth routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/protected", get(protected))
        .with_state(state)
}

fn token_response(auth: &AuthState, user: User) -> Result<TokenResponse, ApiError> {
    let access_token = auth
        .jwt_service
        .generate_access_token(user.id, user.is_admin)
        .map_err(hbnb_core::Error::Internal)?;

    Ok(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: auth.jwt_service.access_token_lifetime_secs(),
        user,
    })
}

/// POST /auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(auth): State<AuthState>,
    State(facade): State<Facade>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = facade
        .users
        .authenticate(&req.email, &req.password)
        .await?
        .ok_or_else(|| AuthError::unauthorized("Invalid credentials"))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(token_response(&auth, user)?))
}

/// POST /auth/register - Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = TokenResponse),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
        (status = 403, description = "Registration is disabled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(auth): State<AuthState>,
    State(facade): State<Facade>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    if auth.config.disable_signup {
        return Err(AuthError::forbidden("Registration is disabled").into());
    }

    let user = facade
        .users
        .create(CreateUserRequest {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            is_admin: false,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(token_response(&auth, user)?)))
}

/// GET /auth/protected - Echo the caller's identity
#[utoipa::path(
    get,
    path = "/auth/protected",
    responses(
        (status = 200, description = "Token accepted", body = ProtectedResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn protected(
    State(facade): State<Facade>,
    user: AuthUser,
) -> Result<Json<ProtectedResponse>, ApiError> {
    let record = facade
        .users
        .get(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ProtectedResponse {
        message: "Access granted".to_string(),
        user_id: user.id,
        is_admin: user.is_admin,
        user: record,
    }))
}
