//! HTTP middleware and error mapping

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::time::Instant;
use uuid::Uuid;

use statgate_core::application::{ApplicationError, ErrorKind};
use statgate_core::domain::auth::AuthError;

use crate::presentation::models::ErrorResponse;

/// HTTP status and stable error code for an error kind
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorKind::PermissionDenied => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
        ErrorKind::InvalidArgument => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::DeadlineExceeded => (StatusCode::GATEWAY_TIMEOUT, "DEADLINE_EXCEEDED"),
        ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// Convert ApplicationError to HTTP response
pub fn application_error_to_response(error: ApplicationError) -> Response {
    let sanitize_errors = std::env::var("ENV").unwrap_or_default() == "production";

    let kind = error.kind();
    let (status, code) = status_for(kind);
    let message = match kind {
        ErrorKind::Internal if sanitize_errors => "An internal error occurred".to_string(),
        ErrorKind::Internal => "Internal server error".to_string(),
        _ => error.message().to_string(),
    };

    if status.is_server_error() {
        tracing::error!(
            error = %error,
            http_status = %status,
            error_code = code,
            "Application error mapped to HTTP response"
        );
    } else {
        tracing::warn!(
            error = %error,
            http_status = %status,
            error_code = code,
            "Request rejected"
        );
    }

    let error_response = ErrorResponse {
        code: code.to_string(),
        message,
        details: if sanitize_errors {
            None
        } else {
            Some(serde_json::json!({ "error": error.to_string() }))
        },
        request_id: Uuid::new_v4(),
        timestamp: Utc::now(),
    };

    (status, Json(error_response)).into_response()
}

/// Handler error carrying an already classified [`ApplicationError`]
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        application_error_to_response(self.0)
    }
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Processing request"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_distinct_status() {
        let kinds = [
            ErrorKind::Unauthenticated,
            ErrorKind::PermissionDenied,
            ErrorKind::InvalidArgument,
            ErrorKind::Conflict,
            ErrorKind::NotFound,
            ErrorKind::DeadlineExceeded,
            ErrorKind::Internal,
        ];
        let statuses: Vec<u16> = kinds.iter().map(|k| status_for(*k).0.as_u16()).collect();
        assert_eq!(statuses, vec![401, 403, 400, 409, 404, 504, 500]);
    }

    #[tokio::test]
    async fn test_error_body_carries_code_and_message() {
        let response =
            application_error_to_response(ApplicationError::not_found("Run 9 not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Run 9 not found");
        assert!(body["request_id"].is_string());
    }

    #[test]
    fn test_auth_errors_convert_through_application_error() {
        let ApiError(error) = AuthError::InvalidCredentials.into();
        assert_eq!(error.kind(), ErrorKind::Unauthenticated);
    }
}
