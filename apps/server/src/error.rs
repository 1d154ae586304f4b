//! Error mapping from core errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use ipdesk_core::errors::{DatabaseError, Error};
use ipdesk_core::locks::LockError;
use ipdesk_core::payments::PaymentError;
use ipdesk_core::signatures::SignatureError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper turning a core error into an HTTP response.
///
/// A lock conflict is the one error that intentionally leaks information:
/// the holder's identity goes into the body so the UI can show who is
/// editing. Everything unexpected is logged in full and returned opaque.
pub struct ApiError(pub Error);

impl<E> From<E> for ApiError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Lock(LockError::Held { held_by }) => (
                StatusCode::LOCKED,
                json!({ "error": "locked", "heldBy": held_by }),
            ),
            Error::Lock(LockError::EmptyActor) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation", "message": self.0.to_string() }),
            ),
            Error::Database(DatabaseError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, json!({ "error": "notFound" }))
            }
            Error::Database(DatabaseError::UniqueViolation(_)) => (
                StatusCode::CONFLICT,
                json!({ "error": "conflict", "message": self.0.to_string() }),
            ),
            Error::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation", "message": e.to_string() }),
            ),
            Error::Signature(SignatureError::AlreadyRequested(_))
            | Error::Signature(SignatureError::NotSigned(_))
            | Error::Payment(PaymentError::AlreadySettled(_)) => (
                StatusCode::CONFLICT,
                json!({ "error": "conflict", "message": self.0.to_string() }),
            ),
            Error::Signature(SignatureError::Platform(_))
            | Error::Payment(PaymentError::Gateway(_)) => {
                tracing::error!("upstream call failed: {}", self.0);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "upstreamUnavailable" }),
                )
            }
            other => {
                tracing::error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
