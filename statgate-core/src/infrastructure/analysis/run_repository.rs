//! SQLx implementation of the run ledger

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::analysis::{
    entities::{AnalysisResultData, AnalysisRun, NewAnalysisRun, ResultSection},
    errors::AnalysisError,
    repositories::IAnalysisRunRepository,
    value_objects::RunId,
};
use crate::domain::auth::UserId;

#[derive(Debug, FromRow)]
struct AnalysisRunRow {
    id: i64,
    user_id: i64,
    file_name: String,
    selected_analyses: Vec<String>,
    dependent_variable: Option<String>,
    independent_variable: Option<String>,
    run_at: DateTime<Utc>,
}

impl From<AnalysisRunRow> for AnalysisRun {
    fn from(row: AnalysisRunRow) -> Self {
        AnalysisRun {
            id: RunId::new(row.id),
            user_id: UserId::new(row.user_id),
            file_name: row.file_name,
            selected_analyses: row.selected_analyses,
            dependent_variable: row.dependent_variable,
            independent_variable: row.independent_variable,
            run_at: row.run_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ResultRow {
    id: i64,
    analysis_run_id: i64,
    result_type: String,
    data: Json<serde_json::Value>,
}

impl From<ResultRow> for AnalysisResultData {
    fn from(row: ResultRow) -> Self {
        AnalysisResultData {
            id: row.id,
            run_id: RunId::new(row.analysis_run_id),
            result_type: row.result_type,
            data: row.data.0,
        }
    }
}

fn map_db_error(context: &str, e: sqlx::Error) -> AnalysisError {
    tracing::error!("Database error {}: {}", context, e);
    AnalysisError::database(format!("Database error while {}: {}", context, e))
}

/// SQLx implementation of `IAnalysisRunRepository`
pub struct SqlxAnalysisRunRepository {
    pool: Arc<PgPool>,
}

impl SqlxAnalysisRunRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IAnalysisRunRepository for SqlxAnalysisRunRepository {
    #[tracing::instrument(skip(self, run), fields(user_id = %run.user_id, file_name = %run.file_name))]
    async fn create_run(&self, run: &NewAnalysisRun) -> Result<AnalysisRun, AnalysisError> {
        let row = sqlx::query_as::<_, AnalysisRunRow>(
            r#"
            INSERT INTO analysis_runs
                (user_id, file_name, selected_analyses, dependent_variable, independent_variable, run_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, file_name, selected_analyses, dependent_variable,
                      independent_variable, run_at
            "#,
        )
        .bind(run.user_id.as_i64())
        .bind(&run.file_name)
        .bind(&run.selected_analyses)
        .bind(run.dependent_variable.as_deref())
        .bind(run.independent_variable.as_deref())
        .bind(run.run_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_db_error("creating analysis run", e))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self, sections), fields(run_id = %run_id, sections = sections.len()))]
    async fn save_results(
        &self,
        run_id: RunId,
        sections: &[ResultSection],
    ) -> Result<(), AnalysisError> {
        if sections.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("starting results transaction", e))?;

        for section in sections {
            sqlx::query(
                r#"
                INSERT INTO analysis_results_data (analysis_run_id, result_type, data)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(run_id.as_i64())
            .bind(&section.result_type)
            .bind(Json(&section.data))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("saving analysis result", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_db_error("committing analysis results", e))
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn find_runs_by_user(&self, user_id: UserId) -> Result<Vec<AnalysisRun>, AnalysisError> {
        let rows = sqlx::query_as::<_, AnalysisRunRow>(
            r#"
            SELECT id, user_id, file_name, selected_analyses, dependent_variable,
                   independent_variable, run_at
            FROM analysis_runs
            WHERE user_id = $1
            ORDER BY run_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_db_error("listing analysis runs", e))?;

        Ok(rows.into_iter().map(AnalysisRun::from).collect())
    }

    #[tracing::instrument(skip(self), fields(run_id = %run_id))]
    async fn find_run_by_id(&self, run_id: RunId) -> Result<Option<AnalysisRun>, AnalysisError> {
        let row = sqlx::query_as::<_, AnalysisRunRow>(
            r#"
            SELECT id, user_id, file_name, selected_analyses, dependent_variable,
                   independent_variable, run_at
            FROM analysis_runs
            WHERE id = $1
            "#,
        )
        .bind(run_id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_db_error("finding analysis run", e))?;

        Ok(row.map(AnalysisRun::from))
    }

    #[tracing::instrument(skip(self), fields(run_id = %run_id))]
    async fn find_results_by_run(
        &self,
        run_id: RunId,
    ) -> Result<Vec<AnalysisResultData>, AnalysisError> {
        let rows = sqlx::query_as::<_, ResultRow>(
            r#"
            SELECT id, analysis_run_id, result_type, data
            FROM analysis_results_data
            WHERE analysis_run_id = $1
            ORDER BY id
            "#,
        )
        .bind(run_id.as_i64())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_db_error("loading analysis results", e))?;

        Ok(rows.into_iter().map(AnalysisResultData::from).collect())
    }

    #[tracing::instrument(skip(self), fields(run_id = %run_id))]
    async fn delete_run(&self, run_id: RunId) -> Result<(), AnalysisError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("starting delete transaction", e))?;

        sqlx::query("DELETE FROM analysis_results_data WHERE analysis_run_id = $1")
            .bind(run_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("deleting analysis results", e))?;

        let result = sqlx::query("DELETE FROM analysis_runs WHERE id = $1")
            .bind(run_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("deleting analysis run", e))?;

        if result.rows_affected() == 0 {
            return Err(AnalysisError::RunNotFound {
                run_id: run_id.as_i64(),
            });
        }

        tx.commit()
            .await
            .map_err(|e| map_db_error("committing run deletion", e))
    }
}
