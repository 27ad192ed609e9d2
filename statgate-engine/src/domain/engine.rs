//! Analysis engine abstraction

use async_trait::async_trait;
use std::time::Duration;

use super::error::EngineError;
use super::report::AnalysisReport;

/// One engine invocation
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub file_content: Vec<u8>,
    pub file_name: String,
    /// Engine-facing selection, companions included
    pub selection: Vec<String>,
    /// Upper bound on the whole call
    pub timeout: Duration,
}

/// Remote statistical computation engine
///
/// Implementations must abort the call once `timeout` elapses and report
/// it as `EngineError::DeadlineExceeded`.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn analyze(&self, request: EngineRequest) -> Result<AnalysisReport, EngineError>;
}
