//! Authentication domain errors

use thiserror::Error;

/// Authentication-specific domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials provided")]
    InvalidCredentials,

    #[error("Invalid token provided")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token claims are malformed: {reason}")]
    MalformedClaims { reason: String },

    #[error("Authentication required")]
    MissingIdentity,

    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email format: {email}")]
    InvalidEmail { email: String },

    #[error("Password is too weak - must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: String },

    #[error("Password hashing failed: {reason}")]
    Hashing { reason: String },

    #[error("Token signing failed: {reason}")]
    Signing { reason: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },
}

impl AuthError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }

    pub fn malformed_claims(reason: impl Into<String>) -> Self {
        Self::MalformedClaims {
            reason: reason.into(),
        }
    }
}
