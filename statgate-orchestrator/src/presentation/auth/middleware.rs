//! Bearer token gate for protected routes

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use statgate_core::application::ApplicationError;
use statgate_core::application::auth::ValidateTokenUseCase;

use super::extractors::AuthErrorResponse;

/// State for the auth gate
#[derive(Clone)]
pub struct AuthGateState {
    pub validate_token: Arc<ValidateTokenUseCase>,
}

/// Token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    let token = token.trim();
    if scheme != "Bearer" || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}

fn reject(message: &str) -> Response {
    AuthErrorResponse {
        status: StatusCode::UNAUTHORIZED,
        error: ApplicationError::unauthenticated(message),
    }
    .into_response()
}

/// Verify the bearer token and bind the caller's identity to the request.
///
/// Every failure is a 401; no request reaches a protected handler without
/// an [`AuthenticatedUser`](statgate_core::domain::auth::AuthenticatedUser)
/// in its extensions.
pub async fn auth_gate_middleware(
    State(state): State<AuthGateState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(value) = request.headers().get(header::AUTHORIZATION) else {
        return reject("Missing Authorization header");
    };
    let Some(token) = value.to_str().ok().and_then(bearer_token) else {
        return reject("Authorization header must be 'Bearer <token>'");
    };

    match state.validate_token.execute(token) {
        Ok(identity) => {
            tracing::debug!(user_id = %identity.user_id, "Bearer token accepted");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            reject(&e.to_string())
        }
    }
}
