//! Analysis ledger errors

use thiserror::Error;

/// Errors raised while validating or persisting analysis runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid analysis selection: {reason}")]
    InvalidSelection { reason: String },

    #[error("Invalid upload: {reason}")]
    InvalidUpload { reason: String },

    #[error("Analysis run not found: {run_id}")]
    RunNotFound { run_id: i64 },

    #[error("Failed to serialize result payload: {message}")]
    Serialization { message: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },
}

impl AnalysisError {
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            reason: reason.into(),
        }
    }

    pub fn invalid_upload(reason: impl Into<String>) -> Self {
        Self::InvalidUpload {
            reason: reason.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}
