//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{ErrorClass, ServiceError, WireError};

/// Body sent in place of internal failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// A downstream service failed.
    Service(ServiceError),
    /// The request could not be extracted (bad path segment or body).
    Rejected { status: StatusCode, message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Service(err) => service_error_to_response(err),
            ApiError::Rejected { status, message } => {
                tracing::debug!(%status, %message, "request rejected");
                (status, message)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Status always follows the transport hint. Internal details stay in the log.
fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match err.class() {
        ErrorClass::BadRequest | ErrorClass::NotFound => (status, err.message().to_string()),
        ErrorClass::InternalError | ErrorClass::Unknown => {
            tracing::error!(error = %err, "internal server error");
            (status, INTERNAL_ERROR_MESSAGE.to_string())
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<WireError> for ApiError {
    fn from(err: WireError) -> Self {
        ApiError::Service(ServiceError::from(err))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
