//! Router assembled from in-memory collaborators

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
    response::Response,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use statgate_core::application::auth::{
    ChangePasswordUseCase, LoginUseCase, RegisterUserUseCase, ValidateTokenUseCase,
};
use statgate_core::config::ServerConfig;
use statgate_core::domain::analysis::IAnalysisRunRepository;
use statgate_core::domain::auth::{IUserRepository, UserId};
use statgate_core::infrastructure::auth::{JwtService, PasswordHasher};
use statgate_engine::AnalysisEngine;
use statgate_orchestrator::application::{
    DeleteRunUseCase, GetFileColumnsUseCase, GetRunResultsUseCase, ListHistoryUseCase,
    SubmitAnalysisUseCase,
};
use statgate_orchestrator::presentation::auth::{AuthAppState, AuthGateState};
use statgate_orchestrator::presentation::{
    ApiState, DependencyProbe, HealthState, OrchestratorState, create_router,
};

use super::mocks::{InMemoryRunRepository, InMemoryUserRepository, MockAnalysisEngine};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const MULTIPART_BOUNDARY: &str = "statgate-test-boundary";

/// Probe with a fixed answer
pub struct StaticProbe(pub Result<(), String>);

#[async_trait]
impl DependencyProbe for StaticProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        self.0.clone()
    }
}

pub struct TestApp {
    pub router: Router,
    pub jwt: Arc<JwtService>,
    pub engine: Arc<MockAnalysisEngine>,
    pub runs: Arc<InMemoryRunRepository>,
}

impl TestApp {
    pub fn new(engine: MockAnalysisEngine) -> Self {
        Self::build(engine, Ok(()))
    }

    pub fn with_database_down(engine: MockAnalysisEngine) -> Self {
        Self::build(engine, Err("connection refused".to_string()))
    }

    fn build(engine: MockAnalysisEngine, database: Result<(), String>) -> Self {
        let engine = Arc::new(engine);
        let runs = Arc::new(InMemoryRunRepository::default());
        let users: Arc<dyn IUserRepository> = Arc::new(InMemoryUserRepository::default());
        let hasher = Arc::new(PasswordHasher::with_params(4096, 1, 1).unwrap());
        let jwt = Arc::new(JwtService::new(TEST_SECRET, 60, "statgate"));

        let engine_dyn: Arc<dyn AnalysisEngine> = engine.clone();
        let runs_dyn: Arc<dyn IAnalysisRunRepository> = runs.clone();

        let state = ApiState {
            auth: AuthAppState {
                login_use_case: Arc::new(
                    LoginUseCase::new(users.clone(), hasher.clone(), jwt.clone()).unwrap(),
                ),
                register_use_case: Arc::new(RegisterUserUseCase::new(
                    users.clone(),
                    hasher.clone(),
                    8,
                )),
                change_password_use_case: Arc::new(ChangePasswordUseCase::new(users, hasher, 8)),
            },
            auth_gate: AuthGateState {
                validate_token: Arc::new(ValidateTokenUseCase::new(jwt.clone())),
            },
            orchestrator: OrchestratorState {
                submit_analysis_use_case: Arc::new(SubmitAnalysisUseCase::new(
                    engine_dyn.clone(),
                    runs_dyn.clone(),
                    Duration::from_secs(30),
                )),
                get_columns_use_case: Arc::new(GetFileColumnsUseCase::new(
                    engine_dyn,
                    Duration::from_secs(10),
                )),
                list_history_use_case: Arc::new(ListHistoryUseCase::new(runs_dyn.clone())),
                get_results_use_case: Arc::new(GetRunResultsUseCase::new(runs_dyn.clone())),
                delete_run_use_case: Arc::new(DeleteRunUseCase::new(runs_dyn)),
            },
            health: HealthState {
                probes: vec![Arc::new(StaticProbe(database))],
            },
        };

        Self {
            router: create_router(state, &ServerConfig::default()),
            jwt,
            engine,
            runs,
        }
    }

    pub fn token_for(&self, user_id: i64) -> String {
        self.jwt.issue(UserId::new(user_id)).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Request with an optional bearer token and no body
pub fn bearer_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// One part of a multipart body: field name, optional file name, content
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

pub fn multipart_request(uri: &str, token: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
