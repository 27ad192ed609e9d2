//! Health check endpoint

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;

use crate::presentation::models::HealthResponse;

/// A dependency the service cannot work without
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), String>;
}

/// Probe that round-trips a trivial query through the pool
pub struct PostgresProbe {
    pool: Arc<PgPool>,
}

impl PostgresProbe {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyProbe for PostgresProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        statgate_core::infrastructure::ping(&self.pool)
            .await
            .map_err(|e| e.to_string())
    }
}

/// State for the health endpoint
#[derive(Clone)]
pub struct HealthState {
    pub probes: Vec<Arc<dyn DependencyProbe>>,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and dependencies are healthy", body = HealthResponse),
        (status = 503, description = "A dependency is unavailable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut healthy = true;
    let mut details = serde_json::Map::new();

    for probe in &state.probes {
        let status = match probe.check().await {
            Ok(()) => serde_json::json!({ "status": "healthy" }),
            Err(error) => {
                healthy = false;
                tracing::warn!(dependency = probe.name(), error = %error, "Health probe failed");
                serde_json::json!({ "status": "unhealthy", "error": error })
            }
        };
        details.insert(probe.name().to_string(), status);
    }

    let (status_code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            details: Some(serde_json::Value::Object(details)),
        }),
    )
}
