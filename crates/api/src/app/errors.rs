use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tsbank_core::{DomainError, ErrorKind};

pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidArgument | ErrorKind::InsufficientFunds => StatusCode::BAD_REQUEST,
    };
    json_error(status, err.kind().as_str(), err.message())
}

/// Malformed bodies keep axum's status (422 for shape/enum errors).
pub fn json_rejection_to_response(rejection: JsonRejection) -> Response {
    json_error(rejection.status(), "invalid_request", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> Response {
    json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_request", rejection.body_text())
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            domain_error_to_response(DomainError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error_to_response(DomainError::invalid("x")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error_to_response(DomainError::insufficient_funds("x")).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
