// Common DTOs and error mapping for the public API
//
// These types are shared across multiple API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthError;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Confirmation body for deletes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Place deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error type returned by every handler.
///
/// Internal failures are logged here and replaced by a generic message.
#[derive(Debug)]
pub enum ApiError {
    Domain(hbnb_core::Error),
    Auth(AuthError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Domain(hbnb_core::Error::not_found(message))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(hbnb_core::Error::Validation(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Domain(hbnb_core::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Domain(hbnb_core::Error::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Domain(hbnb_core::Error::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => err.status,
        }
    }
}

impl From<hbnb_core::Error> for ApiError {
    fn from(err: hbnb_core::Error) -> Self {
        Self::Domain(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Path rejected: {}", rejection.body_text());
        Self::BadRequest("Invalid identifier".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Domain(err) if !err.is_user_visible() => {
                tracing::error!(error = ?err, "Request failed");
                "Internal server error".to_string()
            }
            Self::Domain(err) => err.to_string(),
            Self::Auth(err) => err.error,
            Self::BadRequest(message) => message,
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// JSON body extractor whose rejections use the API error format
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Deserialize a raw JSON body.
///
/// Update handlers take the body as `Bytes` and call this only after the
/// target has been loaded and the caller authorized, so 404 and 403 take
/// precedence over a malformed body.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}

/// Path extractor that answers malformed ids with 400 "Invalid identifier"
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(hbnb_core::Error::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("Place not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(hbnb_core::Error::forbidden("no")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::unauthorized("Authentication required")).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_internal_error_is_not_leaked() {
        let err: hbnb_core::Error = anyhow::anyhow!("password authentication failed for user").into();
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_validation_message_is_returned() {
        let response = ApiError::from(hbnb_core::Error::validation("Email already registered"))
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Email already registered");
    }

    #[test]
    fn test_parse_json() {
        #[derive(Debug, Deserialize)]
        struct Body {
            price: f64,
        }

        let body: Body = parse_json(br#"{"price": 12.5}"#).unwrap();
        assert_eq!(body.price, 12.5);

        let err = parse_json::<Body>(br#"{"price": "abc"}"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.starts_with("Invalid JSON body")));

        assert!(parse_json::<Body>(b"").is_err());
    }

    #[test]
    fn test_list_response_from_vec() {
        let list: ListResponse<i32> = vec![1, 2, 3].into();
        assert_eq!(list.data.len(), 3);
        let json = serde_json::to_value(ListResponse::new(vec!["a"])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": ["a"] }));
    }
}
