//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tokengate_auth::AuthError;
use tokengate_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Seconds until a rate-limited caller may retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(AppError::from(err))
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::InvalidCredentials
        | ErrorKind::Unauthenticated
        | ErrorKind::TokenExpired
        | ErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        ErrorKind::RoleMismatch | ErrorKind::ScopeMissing => StatusCode::FORBIDDEN,
        ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let message = if status.is_server_error() {
            tracing::error!(error = %err, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };

        let retry_after_seconds = err.retry_after_seconds();
        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
            retry_after_seconds,
        };

        let mut response = (status, Json(body)).into_response();
        let headers = response.headers_mut();

        match err.kind {
            ErrorKind::Unauthenticated => {
                headers.insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            }
            ErrorKind::TokenExpired | ErrorKind::InvalidToken => {
                headers.insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Bearer error=\"invalid_token\""),
                );
            }
            _ => {}
        }

        if let Some(secs) = retry_after_seconds {
            headers.insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}
