//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use statgate_core::config::ServerConfig;

use crate::presentation::{
    auth::{
        controller::{AuthAppState, change_password, login, register},
        middleware::{AuthGateState, auth_gate_middleware},
    },
    controllers::{
        analysis::{
            OrchestratorState, analyze, delete_run, get_columns, get_run_results, list_history,
        },
        health::{HealthState, health_check},
    },
    middleware::logging_middleware,
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::auth::controller::register,
        crate::presentation::auth::controller::login,
        crate::presentation::auth::controller::change_password,
        crate::presentation::controllers::analysis::analyze,
        crate::presentation::controllers::analysis::get_columns,
        crate::presentation::controllers::analysis::list_history,
        crate::presentation::controllers::analysis::get_run_results,
        crate::presentation::controllers::analysis::delete_run,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            MessageResponse,
            AnalysisRunDto,
            ColumnsResponse,
            AnalyzeUpload,
            ColumnsUpload,
            crate::presentation::auth::models::RegisterRequest,
            crate::presentation::auth::models::RegisterResponse,
            crate::presentation::auth::models::LoginRequest,
            crate::presentation::auth::models::LoginResponse,
            crate::presentation::auth::models::ChangePasswordRequest,
            statgate_engine::AnalysisReport
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Registration, login and password management"),
        (name = "analysis", description = "Statistical analysis of uploaded data files"),
        (name = "history", description = "Per-user analysis history"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "StatGate API",
        version = "0.1.0",
        description = "Authenticated gateway in front of a remote statistical analysis engine. Uploaded CSV and spreadsheet files are analyzed remotely and every run is recorded per user.",
        license(
            name = "AGPL-3.0",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Everything the router needs, grouped by endpoint family
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthAppState,
    pub auth_gate: AuthGateState,
    pub orchestrator: OrchestratorState,
    pub health: HealthState,
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = if config.allowed_origins.len() == 1 && config.allowed_origins[0] == "*" {
        CorsLayer::new().allow_origin(tower_http::cors::AllowOrigin::mirror_request())
    } else {
        let mut layer = CorsLayer::new();
        for origin in &config.allowed_origins {
            match HeaderValue::from_str(origin) {
                Ok(origin_header) => {
                    layer = layer.allow_origin(origin_header);
                }
                Err(_) => {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                }
            }
        }
        layer
    };

    layer
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600))
}

/// Create the application router
///
/// Public: registration, login, health and docs. Everything else under
/// `/api` sits behind the bearer token gate.
pub fn create_router(state: ApiState, config: &ServerConfig) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .with_state(state.auth.clone());

    let account_routes = Router::new()
        .route("/user/change-password", post(change_password))
        .with_state(state.auth);

    let analysis_routes = Router::new()
        .route("/analyze", post(analyze))
        .route("/columns", post(get_columns))
        .route("/analyses/history", get(list_history))
        .route("/analyses/history/{run_id}/results", get(get_run_results))
        .route("/analyses/history/{run_id}", delete(delete_run))
        .with_state(state.orchestrator);

    let protected_routes = account_routes
        .merge(analysis_routes)
        .route_layer(middleware::from_fn_with_state(
            state.auth_gate,
            auth_gate_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health_check))
        .with_state(state.health);

    let mut router = Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .merge(health_routes);

    if config.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(middleware::from_fn(logging_middleware));

    router.layer(service_builder)
}
