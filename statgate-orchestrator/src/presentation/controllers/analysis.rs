//! Analysis and history endpoints

use axum::{
    extract::{Multipart, Path, State, multipart::Field},
    response::Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use statgate_core::application::ApplicationError;
use statgate_core::domain::analysis::RunId;
use statgate_engine::AnalysisReport;

use crate::application::{
    DeleteRunUseCase, GetFileColumnsUseCase, GetRunResultsUseCase, ListHistoryUseCase,
    SubmitAnalysisCommand, SubmitAnalysisUseCase,
};
use crate::presentation::auth::extractors::AuthUser;
use crate::presentation::middleware::ApiError;
use crate::presentation::models::{
    AnalysisRunDto, AnalyzeUpload, ColumnsResponse, ColumnsUpload, ErrorResponse,
    MessageResponse,
};

/// State for analysis endpoints
#[derive(Clone)]
pub struct OrchestratorState {
    pub submit_analysis_use_case: Arc<SubmitAnalysisUseCase>,
    pub get_columns_use_case: Arc<GetFileColumnsUseCase>,
    pub list_history_use_case: Arc<ListHistoryUseCase>,
    pub get_results_use_case: Arc<GetRunResultsUseCase>,
    pub delete_run_use_case: Arc<DeleteRunUseCase>,
}

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(String, Vec<u8>)>,
    selected_analyses: Vec<String>,
    dependent_variable: Option<String>,
    independent_variable: Option<String>,
}

impl UploadForm {
    fn take_file(&mut self) -> Result<(String, Vec<u8>), ApplicationError> {
        self.file
            .take()
            .ok_or_else(|| ApplicationError::invalid_argument("Missing 'file' field"))
    }
}

fn multipart_error(error: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::invalid_argument(format!("Malformed multipart body: {}", error))
}

async fn field_text(field: Field<'_>) -> Result<String, ApplicationError> {
    field.text().await.map_err(multipart_error)
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApplicationError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some((file_name, bytes.to_vec()));
            }
            "selected_analyses" => form.selected_analyses.push(field_text(field).await?),
            "dependent_variable" => form.dependent_variable = Some(field_text(field).await?),
            "independent_variable" => form.independent_variable = Some(field_text(field).await?),
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}

fn parse_run_id(raw: &str) -> Result<RunId, ApplicationError> {
    raw.parse::<RunId>()
        .map_err(|_| ApplicationError::invalid_argument(format!("Invalid run id: {}", raw)))
}

/// POST /api/analyze - Run the selected analyses on an uploaded file
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analysis",
    request_body(content = AnalyzeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis report", body = AnalysisReport),
        (status = 400, description = "Invalid upload or selection", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 504, description = "Engine timed out", body = ErrorResponse),
        (status = 500, description = "Engine or ledger failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze(
    State(state): State<OrchestratorState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    let mut form = read_upload_form(multipart).await?;
    let (file_name, file_content) = form.take_file()?;

    let report = state
        .submit_analysis_use_case
        .execute(
            auth.user_id,
            SubmitAnalysisCommand {
                file_name,
                file_content,
                selected_analyses: form.selected_analyses,
                dependent_variable: form.dependent_variable,
                independent_variable: form.independent_variable,
            },
        )
        .await?;

    Ok(Json(report))
}

/// POST /api/columns - List the columns of an uploaded file
#[utoipa::path(
    post,
    path = "/api/columns",
    tag = "analysis",
    request_body(content = ColumnsUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Column names in file order", body = ColumnsResponse),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_columns(
    State(state): State<OrchestratorState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let mut form = read_upload_form(multipart).await?;
    let (file_name, file_content) = form.take_file()?;

    let columns = state
        .get_columns_use_case
        .execute(auth.user_id, file_name, file_content)
        .await?;

    Ok(Json(ColumnsResponse { columns }))
}

/// GET /api/analyses/history - The caller's runs, newest first
#[utoipa::path(
    get,
    path = "/api/analyses/history",
    tag = "history",
    responses(
        (status = 200, description = "Analysis runs", body = [AnalysisRunDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_history(
    State(state): State<OrchestratorState>,
    auth: AuthUser,
) -> Result<Json<Vec<AnalysisRunDto>>, ApiError> {
    let runs = state.list_history_use_case.execute(auth.user_id).await?;
    Ok(Json(runs.into_iter().map(AnalysisRunDto::from).collect()))
}

/// GET /api/analyses/history/{run_id}/results - Stored results of a run
#[utoipa::path(
    get,
    path = "/api/analyses/history/{run_id}/results",
    tag = "history",
    params(("run_id" = i64, Path, description = "Analysis run id")),
    responses(
        (status = 200, description = "Result payloads keyed by result kind", body = BTreeMap<String, serde_json::Value>),
        (status = 403, description = "Run belongs to another user", body = ErrorResponse),
        (status = 404, description = "Run or results not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_run_results(
    State(state): State<OrchestratorState>,
    auth: AuthUser,
    Path(run_id): Path<String>,
) -> Result<Json<BTreeMap<String, serde_json::Value>>, ApiError> {
    let run_id = parse_run_id(&run_id)?;
    let results = state
        .get_results_use_case
        .execute(auth.user_id, run_id)
        .await?;
    Ok(Json(results))
}

/// DELETE /api/analyses/history/{run_id} - Delete a run and its results
#[utoipa::path(
    delete,
    path = "/api/analyses/history/{run_id}",
    tag = "history",
    params(("run_id" = i64, Path, description = "Analysis run id")),
    responses(
        (status = 200, description = "Run deleted", body = MessageResponse),
        (status = 403, description = "Run belongs to another user", body = ErrorResponse),
        (status = 404, description = "Run not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_run(
    State(state): State<OrchestratorState>,
    auth: AuthUser,
    Path(run_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let run_id = parse_run_id(&run_id)?;
    state
        .delete_run_use_case
        .execute(auth.user_id, run_id)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Analysis run {} deleted",
        run_id
    ))))
}
