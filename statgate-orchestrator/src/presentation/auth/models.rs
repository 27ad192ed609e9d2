//! Authentication DTOs for API requests and responses

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "secure_password_123")]
    pub password: String,
}

/// Register new user request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[schema(example = "newuser@example.com")]
    pub email: String,
    /// User password (minimum 8 characters by default)
    #[schema(example = "secure_password_123")]
    pub password: String,
}

/// Change password request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[schema(example = "secure_password_123")]
    pub current_password: String,
    #[schema(example = "even_more_secure_456")]
    pub new_password: String,
}

/// Registration response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "newuser@example.com")]
    pub email: String,
}

/// Login response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// Bearer token for the `Authorization` header
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: u64,
}
