use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{info, warn};

/// Maps an `ApplicationError` to its status code and a `{"detail": ...}` body.
pub(crate) fn map_application_error_to_response(err: ApplicationError) -> Response {
    let status = match &err {
        ApplicationError::NotFound { kind, id } => {
            info!(kind = %kind, id = %id, "Responding 404");
            StatusCode::NOT_FOUND
        }
        ApplicationError::DuplicateIdentity { kind, id } => {
            warn!(kind = %kind, id = %id, "Responding 409");
            StatusCode::CONFLICT
        }
        ApplicationError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApplicationError::DomainError(domain_err) => {
            warn!("Domain validation failed: {}", domain_err);
            StatusCode::BAD_REQUEST
        }
    };
    (status, Json(json!({ "detail": err.to_string() }))).into_response()
}
