use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use rollstock_core::DomainError;
use rollstock_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!("store failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

/// A statistics pass that panicked or was cancelled.
pub fn join_error_to_response(err: tokio::task::JoinError) -> axum::response::Response {
    tracing::error!("statistics task failed: {err}");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "statistics computation failed",
    )
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    tracing::debug!("request rejected: {err}");
    match err {
        DomainError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        DomainError::InvalidRange(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_range", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
