//! API request and response models

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use statgate_core::domain::analysis::AnalysisRun;

/// Error response model
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "Requested resource was not found")]
    pub message: String,

    /// Additional error details (omitted in production)
    pub details: Option<serde_json::Value>,

    /// Request ID for tracking
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub request_id: Uuid,

    /// Error timestamp
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status
    #[schema(example = "healthy")]
    pub status: String,

    /// Service version
    #[schema(example = "0.1.0")]
    pub version: String,

    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,

    /// Per-dependency status
    pub details: Option<serde_json::Value>,
}

/// One entry of the analysis history
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisRunDto {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "survey.csv")]
    pub file_name: String,
    /// Selected analysis kinds as submitted
    #[schema(example = json!(["descriptive_stats", "regression"]))]
    pub selected_analyses: Vec<String>,
    #[schema(example = "income")]
    pub dependent_variable: Option<String>,
    #[schema(example = "age")]
    pub independent_variable: Option<String>,
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub run_at: DateTime<Utc>,
}

impl From<AnalysisRun> for AnalysisRunDto {
    fn from(run: AnalysisRun) -> Self {
        Self {
            id: run.id.as_i64(),
            file_name: run.file_name,
            selected_analyses: run.selected_analyses,
            dependent_variable: run.dependent_variable,
            independent_variable: run.independent_variable,
            run_at: run.run_at,
        }
    }
}

/// Column listing of an uploaded file
#[derive(Debug, Serialize, ToSchema)]
pub struct ColumnsResponse {
    #[schema(example = json!(["age", "income", "city"]))]
    pub columns: Vec<String>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Analysis run deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Multipart body of `POST /api/analyze` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AnalyzeUpload {
    /// Data file (CSV or spreadsheet)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Analysis kinds; repeat the field for each kind
    #[schema(example = json!(["descriptive_stats", "regression"]))]
    pub selected_analyses: Vec<String>,
    /// Required when `regression` is selected
    pub dependent_variable: Option<String>,
    /// Required when `regression` is selected
    pub independent_variable: Option<String>,
}

/// Multipart body of `POST /api/columns` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ColumnsUpload {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
