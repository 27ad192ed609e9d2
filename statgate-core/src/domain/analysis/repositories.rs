//! Run ledger repository trait

use async_trait::async_trait;

use super::entities::{AnalysisResultData, AnalysisRun, NewAnalysisRun, ResultSection};
use super::errors::AnalysisError;
use super::value_objects::RunId;
use crate::domain::auth::UserId;

/// Persistence for analysis runs and their result payloads
#[async_trait]
pub trait IAnalysisRunRepository: Send + Sync {
    /// Insert run metadata and return the stored run
    async fn create_run(&self, run: &NewAnalysisRun) -> Result<AnalysisRun, AnalysisError>;

    /// Write all result sections for a run in a single transaction
    async fn save_results(
        &self,
        run_id: RunId,
        sections: &[ResultSection],
    ) -> Result<(), AnalysisError>;

    /// All runs owned by a user, newest first
    async fn find_runs_by_user(&self, user_id: UserId) -> Result<Vec<AnalysisRun>, AnalysisError>;

    /// Look a run up regardless of owner
    async fn find_run_by_id(&self, run_id: RunId) -> Result<Option<AnalysisRun>, AnalysisError>;

    async fn find_results_by_run(
        &self,
        run_id: RunId,
    ) -> Result<Vec<AnalysisResultData>, AnalysisError>;

    /// Remove result rows, then the run row, in one transaction
    async fn delete_run(&self, run_id: RunId) -> Result<(), AnalysisError>;
}
