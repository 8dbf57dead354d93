use crate::store::StoreError;
use axum::response::IntoResponse;
use axum::Json;
use drinks_auth::AuthError;
use http::StatusCode;
use log::error;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every failed response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    /// HTTP status code
    pub error: u16,
    /// Human readable description
    pub message: String,
    /// Machine-readable reason, only set for authorization failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub code: Option<&'static str>,
}

impl ApiError {
    /// Create a new ApiError with a message and status code
    pub fn new<S: ToString>(message: S, status_code: StatusCode) -> Self {
        Self {
            message: message.to_string(),
            status_code,
            code: None,
        }
    }

    /// Not Found (404), also used for empty collections and missing bodies
    pub fn not_found() -> Self {
        Self::new("resource not found", StatusCode::NOT_FOUND)
    }

    /// Bad Request (400)
    pub fn bad_request() -> Self {
        Self::new("bad request", StatusCode::BAD_REQUEST)
    }

    /// Unprocessable Entity (422)
    pub fn unprocessable() -> Self {
        Self::new("unprocessable", StatusCode::UNPROCESSABLE_ENTITY)
    }

    /// Internal Server Error (500)
    pub fn internal() -> Self {
        Self::new("internal server error", StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status_code(),
            code: Some(err.code()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::unprocessable(),
            err => {
                error!("Store operation failed: {}", err);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorEnvelope {
            success: false,
            error: self.status_code.as_u16(),
            message: self.message,
            code: self.code,
        };
        (self.status_code, Json(body)).into_response()
    }
}
