// Authentication extractors
// Decision: Header-based bearer tokens only
// Decision: Identity comes from token claims alone; storage is not consulted per request

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{config::AuthConfig, jwt::JwtService};

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated user context extracted from request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID (token subject)
    pub id: Uuid,
    /// Admin claim as issued
    pub is_admin: bool,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub jwt_service: Arc<JwtService>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            jwt_service,
        }
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        extract_auth_user(parts, &auth_state)
    }
}

/// Extract authenticated user from the Authorization header
fn extract_auth_user(parts: &Parts, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::unauthorized("Authentication required"))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::unauthorized("Invalid or expired token"))?;

    validate_jwt_token(token, auth_state)
}

/// Validate JWT token and return user
fn validate_jwt_token(token: &str, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let claims = auth_state
        .jwt_service
        .validate_access_token(token)
        .map_err(|e| {
            tracing::debug!("JWT validation failed: {:#}", e);
            AuthError::unauthorized("Invalid or expired token")
        })?;

    let id = claims.user_id().map_err(|e| {
        tracing::debug!("JWT subject rejected: {:#}", e);
        AuthError::unauthorized("Invalid or expired token")
    })?;

    Ok(AuthUser {
        id,
        is_admin: claims.is_admin,
    })
}

/// Optional auth extractor - returns None if no valid token is presented
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        Ok(OptionalAuthUser(extract_auth_user(parts, &auth_state).ok()))
    }
}

/// Require admin claim extractor
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(AuthError::forbidden("Admin access required"));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::JwtConfig;
    use axum::http::Request;
    use std::time::Duration;

    fn auth_state() -> AuthState {
        AuthState::new(AuthConfig {
            jwt: JwtConfig {
                secret: "middleware-test-secret".to_string(),
                access_token_lifetime: Duration::from_secs(60),
            },
            ..Default::default()
        })
    }

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_auth_error() {
        let error = AuthError::unauthorized("Test error");
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.error, "Test error");

        let forbidden = AuthError::forbidden("Forbidden");
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_header() {
        let err = extract_auth_user(&parts_with(None), &auth_state()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error, "Authentication required");
    }

    #[test]
    fn test_non_bearer_scheme() {
        let err =
            extract_auth_user(&parts_with(Some("Basic dXNlcjpwYXNz")), &auth_state()).unwrap_err();
        assert_eq!(err.error, "Invalid or expired token");
    }

    #[test]
    fn test_valid_bearer_token() {
        let state = auth_state();
        let user_id = Uuid::now_v7();
        let token = state
            .jwt_service
            .generate_access_token(user_id, false)
            .unwrap();

        let user =
            extract_auth_user(&parts_with(Some(&format!("Bearer {token}"))), &state).unwrap();
        assert_eq!(
            user,
            AuthUser {
                id: user_id,
                is_admin: false
            }
        );
    }

    #[test]
    fn test_token_from_other_secret() {
        let other = AuthState::new(AuthConfig {
            jwt: JwtConfig {
                secret: "a-different-secret".to_string(),
                access_token_lifetime: Duration::from_secs(60),
            },
            ..Default::default()
        });
        let token = other
            .jwt_service
            .generate_access_token(Uuid::now_v7(), true)
            .unwrap();

        let err = extract_auth_user(&parts_with(Some(&format!("Bearer {token}"))), &auth_state())
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
