//! Authentication controller endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;

use statgate_core::application::auth::{ChangePasswordUseCase, LoginUseCase, RegisterUserUseCase};

use crate::presentation::auth::extractors::AuthUser;
use crate::presentation::auth::models::*;
use crate::presentation::middleware::ApiError;
use crate::presentation::models::{ErrorResponse, MessageResponse};

/// State for auth endpoints
#[derive(Clone)]
pub struct AuthAppState {
    pub login_use_case: Arc<LoginUseCase>,
    pub register_use_case: Arc<RegisterUserUseCase>,
    pub change_password_use_case: Arc<ChangePasswordUseCase>,
}

/// Register new user endpoint
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = RegisterResponse),
        (status = 400, description = "Invalid email or weak password", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AuthAppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let result = state
        .register_use_case
        .execute(&request.email, request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: result.user_id.as_i64(),
            email: result.email.into_string(),
        }),
    ))
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state
        .login_use_case
        .execute(&request.email, request.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: result.token,
        user_id: result.user_id.as_i64(),
        email: result.email.into_string(),
        expires_in: result.expires_in,
    }))
}

/// Change the caller's password
#[utoipa::path(
    post,
    path = "/api/user/change-password",
    tag = "auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Missing field or weak password", body = ErrorResponse),
        (status = 401, description = "Missing token or wrong current password", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AuthAppState>,
    auth: AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .change_password_use_case
        .execute(auth.user_id, request.current_password, request.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}
