//! Orchestrator use cases

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use statgate_core::application::ApplicationError;
use statgate_core::domain::analysis::{
    AnalysisError, AnalysisRun, AnalysisSelection, IAnalysisRunRepository, NewAnalysisRun, RunId,
    validate_upload,
};
use statgate_core::domain::auth::UserId;
use statgate_engine::{
    AnalysisEngine, AnalysisReport, EngineRequest, columns_request, parse_columns,
};

/// Uploaded file plus the caller's analysis selection
#[derive(Debug, Clone)]
pub struct SubmitAnalysisCommand {
    pub file_name: String,
    pub file_content: Vec<u8>,
    pub selected_analyses: Vec<String>,
    pub dependent_variable: Option<String>,
    pub independent_variable: Option<String>,
}

fn require_identity(user_id: UserId) -> Result<(), ApplicationError> {
    if user_id.is_valid() {
        Ok(())
    } else {
        Err(ApplicationError::unauthenticated("Authentication required"))
    }
}

/// Resolve a run the caller owns.
///
/// A run that exists under another owner is `PermissionDenied`; a run that
/// does not exist at all is `NotFound`.
async fn owned_run(
    runs: &dyn IAnalysisRunRepository,
    user_id: UserId,
    run_id: RunId,
) -> Result<AnalysisRun, ApplicationError> {
    let owned = runs.find_runs_by_user(user_id).await?;
    if let Some(run) = owned.into_iter().find(|run| run.id == run_id) {
        return Ok(run);
    }

    match runs.find_run_by_id(run_id).await? {
        Some(_) => Err(ApplicationError::permission_denied(format!(
            "Run {} does not belong to the caller",
            run_id
        ))),
        None => Err(ApplicationError::not_found(format!("Run {} not found", run_id))),
    }
}

/// Use case for running an analysis and recording it in the ledger
pub struct SubmitAnalysisUseCase {
    engine: Arc<dyn AnalysisEngine>,
    runs: Arc<dyn IAnalysisRunRepository>,
    timeout: Duration,
}

impl SubmitAnalysisUseCase {
    pub fn new(
        engine: Arc<dyn AnalysisEngine>,
        runs: Arc<dyn IAnalysisRunRepository>,
        timeout: Duration,
    ) -> Self {
        Self {
            engine,
            runs,
            timeout,
        }
    }

    /// Forward the upload to the engine, then record the run and its results.
    ///
    /// Nothing is written when the engine fails. A failed results write is
    /// logged and the report is still returned.
    #[tracing::instrument(
        skip(self, command),
        fields(user_id = %user_id, file_name = %command.file_name, bytes = command.file_content.len())
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        command: SubmitAnalysisCommand,
    ) -> Result<AnalysisReport, ApplicationError> {
        require_identity(user_id)?;

        let selection = AnalysisSelection::new(
            command.selected_analyses,
            command.dependent_variable,
            command.independent_variable,
        )?;
        validate_upload(&command.file_name, &command.file_content)?;

        let report = self
            .engine
            .analyze(EngineRequest {
                file_content: command.file_content,
                file_name: command.file_name.clone(),
                selection: selection.engine_selection(),
                timeout: self.timeout,
            })
            .await?;

        let run = self
            .runs
            .create_run(&NewAnalysisRun::new(user_id, command.file_name, &selection))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to record analysis run");
                ApplicationError::internal("Failed to record analysis run")
            })?;

        match report.result_sections().map_err(AnalysisError::from) {
            Ok(sections) if sections.is_empty() => {
                tracing::debug!(run_id = %run.id, "Engine returned no result sections");
            }
            Ok(sections) => {
                if let Err(e) = self.runs.save_results(run.id, &sections).await {
                    tracing::error!(run_id = %run.id, error = %e, "Failed to store analysis results");
                }
            }
            Err(e) => {
                tracing::error!(run_id = %run.id, error = %e, "Failed to serialize analysis results");
            }
        }

        tracing::info!(
            run_id = %run.id,
            kinds = ?run.selected_analyses,
            "Analysis completed"
        );
        Ok(report)
    }
}

/// Use case for listing the columns of an uploaded file
pub struct GetFileColumnsUseCase {
    engine: Arc<dyn AnalysisEngine>,
    timeout: Duration,
}

impl GetFileColumnsUseCase {
    pub fn new(engine: Arc<dyn AnalysisEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Column names in file order; empty when the engine reports none.
    /// Nothing is recorded in the ledger.
    #[tracing::instrument(skip(self, file_content), fields(user_id = %user_id, file_name = %file_name))]
    pub async fn execute(
        &self,
        user_id: UserId,
        file_name: String,
        file_content: Vec<u8>,
    ) -> Result<Vec<String>, ApplicationError> {
        require_identity(user_id)?;
        validate_upload(&file_name, &file_content)?;

        let report = self
            .engine
            .analyze(columns_request(file_content, file_name, self.timeout))
            .await?;

        let columns = parse_columns(&report.processing_log);
        if columns.is_empty() {
            tracing::warn!("Engine reported no columns");
        }
        Ok(columns)
    }
}

/// Use case for listing a user's runs, newest first
pub struct ListHistoryUseCase {
    runs: Arc<dyn IAnalysisRunRepository>,
}

impl ListHistoryUseCase {
    pub fn new(runs: Arc<dyn IAnalysisRunRepository>) -> Self {
        Self { runs }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<AnalysisRun>, ApplicationError> {
        require_identity(user_id)?;
        Ok(self.runs.find_runs_by_user(user_id).await?)
    }
}

/// Use case for reading the stored result payloads of one run
pub struct GetRunResultsUseCase {
    runs: Arc<dyn IAnalysisRunRepository>,
}

impl GetRunResultsUseCase {
    pub fn new(runs: Arc<dyn IAnalysisRunRepository>) -> Self {
        Self { runs }
    }

    /// Result payloads keyed by result kind.
    ///
    /// An owned run with no stored results is `NotFound`.
    #[tracing::instrument(skip(self), fields(user_id = %user_id, run_id = %run_id))]
    pub async fn execute(
        &self,
        user_id: UserId,
        run_id: RunId,
    ) -> Result<BTreeMap<String, serde_json::Value>, ApplicationError> {
        require_identity(user_id)?;
        let run = owned_run(self.runs.as_ref(), user_id, run_id).await?;

        let results = self.runs.find_results_by_run(run.id).await?;
        if results.is_empty() {
            return Err(ApplicationError::not_found(format!(
                "No results stored for run {}",
                run.id
            )));
        }

        Ok(results
            .into_iter()
            .map(|result| (result.result_type, result.data))
            .collect())
    }
}

/// Use case for deleting one of the caller's runs with its results
pub struct DeleteRunUseCase {
    runs: Arc<dyn IAnalysisRunRepository>,
}

impl DeleteRunUseCase {
    pub fn new(runs: Arc<dyn IAnalysisRunRepository>) -> Self {
        Self { runs }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id, run_id = %run_id))]
    pub async fn execute(&self, user_id: UserId, run_id: RunId) -> Result<(), ApplicationError> {
        require_identity(user_id)?;
        let run = owned_run(self.runs.as_ref(), user_id, run_id).await?;
        self.runs.delete_run(run.id).await?;
        tracing::info!("Analysis run deleted");
        Ok(())
    }
}
