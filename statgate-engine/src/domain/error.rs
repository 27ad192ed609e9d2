//! Engine call failures, classified from the gRPC status code

use statgate_core::application::errors::ApplicationError;
use std::time::Duration;
use thiserror::Error;
use tonic::Code;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine rejected the input (bad file, unknown format)
    #[error("Engine rejected request: {message}")]
    InvalidArgument { message: String },

    /// The engine cannot process this input in its current setup
    #[error("Engine precondition failed: {message}")]
    FailedPrecondition { message: String },

    #[error("Engine call timed out: {message}")]
    DeadlineExceeded { message: String },

    #[error("Engine unavailable: {message}")]
    Unavailable { message: String },

    #[error("Engine configuration error: {message}")]
    Configuration { message: String },

    #[error("Engine internal error: {message}")]
    Internal { message: String },
}

impl EngineError {
    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Self::DeadlineExceeded {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::FailedPrecondition { .. }
        )
    }
}

impl EngineError {
    /// Classify a status returned by a call that was bounded by `timeout`.
    ///
    /// tonic's own deadline layer reports an expired `grpc-timeout` as
    /// `Cancelled`; once the budget is spent that is a timeout, not a failure.
    pub fn from_bounded_status(status: tonic::Status, elapsed: Duration, timeout: Duration) -> Self {
        if status.code() == Code::Cancelled && elapsed >= timeout {
            return Self::deadline_exceeded(format!(
                "no response within {}ms",
                timeout.as_millis()
            ));
        }
        Self::from(status)
    }
}

impl From<tonic::Status> for EngineError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::InvalidArgument => Self::InvalidArgument { message },
            Code::FailedPrecondition => Self::FailedPrecondition { message },
            Code::DeadlineExceeded => Self::DeadlineExceeded { message },
            Code::Unavailable => Self::Unavailable { message },
            code => Self::Internal {
                message: format!("{:?}: {}", code, message),
            },
        }
    }
}

impl From<EngineError> for ApplicationError {
    fn from(error: EngineError) -> Self {
        if error.is_client_error() {
            ApplicationError::invalid_argument(error.to_string())
        } else if matches!(error, EngineError::DeadlineExceeded { .. }) {
            ApplicationError::deadline_exceeded(error.to_string())
        } else {
            ApplicationError::internal(error.to_string())
        }
    }
}
