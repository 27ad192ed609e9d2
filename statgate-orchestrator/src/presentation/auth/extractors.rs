//! Authentication extractors for Axum

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use statgate_core::application::ApplicationError;
use statgate_core::domain::auth::{AuthenticatedUser, UserId};

use crate::presentation::middleware::application_error_to_response;

/// Identity bound by the auth gate
///
/// Handlers behind the gate take this as an argument. The token itself is
/// never read here.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| {
                tracing::error!(
                    uri = %parts.uri,
                    "No authenticated identity bound to a protected route"
                );
                AuthErrorResponse {
                    status: StatusCode::UNAUTHORIZED,
                    error: ApplicationError::unauthenticated("Authentication required"),
                }
            })?;

        Ok(AuthUser {
            user_id: identity.user_id,
        })
    }
}

/// Rejection produced by authentication extractors and the auth gate
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub status: StatusCode,
    pub error: ApplicationError,
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        let mut response = application_error_to_response(self.error);
        *response.status_mut() = self.status;
        response
    }
}
