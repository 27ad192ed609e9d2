//! Application-level error taxonomy
//!
//! Every failure is classified once, where it originates, and carried to the
//! presentation layer through the `From` conversions below.

use thiserror::Error;

use crate::domain::analysis::AnalysisError;
use crate::domain::auth::AuthError;

/// Error class of an [`ApplicationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    PermissionDenied,
    InvalidArgument,
    Conflict,
    NotFound,
    DeadlineExceeded,
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Deadline exceeded: {message}")]
    DeadlineExceeded { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApplicationError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Self::DeadlineExceeded {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated { message }
            | Self::PermissionDenied { message }
            | Self::InvalidArgument { message }
            | Self::Conflict { message }
            | Self::NotFound { message }
            | Self::DeadlineExceeded { message }
            | Self::Internal { message } => message,
        }
    }
}

impl From<AuthError> for ApplicationError {
    fn from(error: AuthError) -> Self {
        let message = error.to_string();
        match error {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::MalformedClaims { .. }
            | AuthError::MissingIdentity => Self::Unauthenticated { message },
            AuthError::EmailAlreadyExists { .. } => Self::Conflict { message },
            AuthError::InvalidEmail { .. }
            | AuthError::WeakPassword { .. }
            | AuthError::MissingField { .. } => Self::InvalidArgument { message },
            AuthError::UserIdNotFound { .. } => Self::NotFound { message },
            AuthError::Hashing { .. } | AuthError::Signing { .. } | AuthError::DatabaseError { .. } => {
                Self::Internal { message }
            }
        }
    }
}

impl From<AnalysisError> for ApplicationError {
    fn from(error: AnalysisError) -> Self {
        let message = error.to_string();
        match error {
            AnalysisError::InvalidSelection { .. } | AnalysisError::InvalidUpload { .. } => {
                Self::InvalidArgument { message }
            }
            AnalysisError::RunNotFound { .. } => Self::NotFound { message },
            AnalysisError::Serialization { .. } | AnalysisError::DatabaseError { .. } => {
                Self::Internal { message }
            }
        }
    }
}
