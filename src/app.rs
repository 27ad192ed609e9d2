//! Application setup and wiring

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use statgate_core::Config;
use statgate_core::application::auth::{
    ChangePasswordUseCase, LoginUseCase, RegisterUserUseCase, ValidateTokenUseCase,
};
use statgate_core::domain::analysis::IAnalysisRunRepository;
use statgate_core::domain::auth::IUserRepository;
use statgate_core::infrastructure::{
    JwtService, PasswordHasher, SqlxAnalysisRunRepository, SqlxUserRepository, create_pool,
};
use statgate_engine::{AnalysisEngine, GrpcAnalysisEngine};
use statgate_orchestrator::application::{
    DeleteRunUseCase, GetFileColumnsUseCase, GetRunResultsUseCase, ListHistoryUseCase,
    SubmitAnalysisUseCase,
};
use statgate_orchestrator::presentation::auth::{AuthAppState, AuthGateState};
use statgate_orchestrator::presentation::{
    ApiState, HealthState, OrchestratorState, PostgresProbe, create_router,
};

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Connect the database and build the application
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let db_pool = create_pool(&config.database).await?;
    build_app(&config, db_pool)
}

/// Build the application around an existing pool
///
/// The engine channel connects lazily; an unreachable engine surfaces on the
/// first analysis request, not at startup.
pub fn build_app(
    config: &Config,
    db_pool: PgPool,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let shutdown_token = CancellationToken::new();
    let db_pool = Arc::new(db_pool);

    // Persistence
    let user_repository: Arc<dyn IUserRepository> =
        Arc::new(SqlxUserRepository::new(db_pool.clone()));
    let run_repository: Arc<dyn IAnalysisRunRepository> =
        Arc::new(SqlxAnalysisRunRepository::new(db_pool.clone()));

    // Credentials
    let jwt_service = Arc::new(JwtService::from_config(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());
    let min_password_length = config.auth.min_password_length;

    let auth = AuthAppState {
        login_use_case: Arc::new(LoginUseCase::new(
            user_repository.clone(),
            password_hasher.clone(),
            jwt_service.clone(),
        )?),
        register_use_case: Arc::new(RegisterUserUseCase::new(
            user_repository.clone(),
            password_hasher.clone(),
            min_password_length,
        )),
        change_password_use_case: Arc::new(ChangePasswordUseCase::new(
            user_repository,
            password_hasher,
            min_password_length,
        )),
    };
    let auth_gate = AuthGateState {
        validate_token: Arc::new(ValidateTokenUseCase::new(jwt_service)),
    };

    // Analysis engine
    tracing::info!(address = %config.engine.address, "Configuring analysis engine client");
    let engine: Arc<dyn AnalysisEngine> = Arc::new(GrpcAnalysisEngine::connect_lazy(&config.engine)?);
    let analyze_timeout = Duration::from_secs(config.engine.analyze_timeout_seconds);
    let columns_timeout = Duration::from_secs(config.engine.columns_timeout_seconds);

    let orchestrator = OrchestratorState {
        submit_analysis_use_case: Arc::new(SubmitAnalysisUseCase::new(
            engine.clone(),
            run_repository.clone(),
            analyze_timeout,
        )),
        get_columns_use_case: Arc::new(GetFileColumnsUseCase::new(engine, columns_timeout)),
        list_history_use_case: Arc::new(ListHistoryUseCase::new(run_repository.clone())),
        get_results_use_case: Arc::new(GetRunResultsUseCase::new(run_repository.clone())),
        delete_run_use_case: Arc::new(DeleteRunUseCase::new(run_repository)),
    };

    let health = HealthState {
        probes: vec![Arc::new(PostgresProbe::new(db_pool))],
    };

    let router = create_router(
        ApiState {
            auth,
            auth_gate,
            orchestrator,
            health,
        },
        &config.server,
    );

    Ok(AppHandle {
        router,
        shutdown_token,
    })
}
