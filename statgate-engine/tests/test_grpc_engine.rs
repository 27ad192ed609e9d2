//! GrpcAnalysisEngine against an in-process tonic server

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use statgate_core::config::EngineConfig;
use statgate_engine::pb::analysis_service_server::{AnalysisService, AnalysisServiceServer};
use statgate_engine::pb::{self, AnalysisRequest, AnalysisResponse};
use statgate_engine::{
    AnalysisEngine, EngineError, EngineRequest, GrpcAnalysisEngine, columns_request, parse_columns,
};

/// Behaviour is keyed by the uploaded file name
#[derive(Clone, Default)]
struct ScriptedEngine {
    seen_selections: Arc<Mutex<Vec<Vec<String>>>>,
}

#[tonic::async_trait]
impl AnalysisService for ScriptedEngine {
    async fn analyze_data(
        &self,
        request: Request<AnalysisRequest>,
    ) -> Result<Response<AnalysisResponse>, Status> {
        let req = request.into_inner();
        self.seen_selections
            .lock()
            .unwrap()
            .push(req.selected_analyses.clone());

        match req.file_name.as_str() {
            "bad.csv" => return Err(Status::invalid_argument("Error parsing file bad.csv")),
            "sheet.xlsx" => {
                return Err(Status::failed_precondition(
                    "openpyxl is required to read Excel files (.xlsx)",
                ));
            }
            "crash.csv" => return Err(Status::internal("unexpected error")),
            "slow.csv" => tokio::time::sleep(Duration::from_secs(5)).await,
            _ => {}
        }

        if req.selected_analyses == ["get_columns_only"] {
            return Ok(Response::new(AnalysisResponse {
                processing_log: vec![
                    "Detected file type: csv".to_string(),
                    "COLUMNS:age, income".to_string(),
                ],
                ..Default::default()
            }));
        }

        Ok(Response::new(AnalysisResponse {
            processing_log: vec!["Core statistical analysis completed.".to_string()],
            descriptives: vec![pb::DescriptiveStatistics {
                variable_name: "age".to_string(),
                count: 3,
                mean: 30.0,
                median: 30.0,
                mode: vec![30.0],
                ..Default::default()
            }],
            correlation: Some(pb::CorrelationResult {
                pearson: vec![pb::correlation_result::PearsonCorrelation {
                    variable1: "age".to_string(),
                    variable2: "income".to_string(),
                    coefficient: 0.8,
                    p_value: 0.04,
                }],
                spearman: vec![],
            }),
            ..Default::default()
        }))
    }
}

async fn start_engine(svc: ScriptedEngine) -> GrpcAnalysisEngine {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let incoming = TcpListenerStream::new(listener);
        let _ = Server::builder()
            .add_service(AnalysisServiceServer::new(svc))
            .serve_with_incoming(incoming)
            .await;
    });

    GrpcAnalysisEngine::connect_lazy(&EngineConfig {
        address: format!("http://{}", addr),
        ..Default::default()
    })
    .unwrap()
}

fn request(file_name: &str, timeout: Duration) -> EngineRequest {
    EngineRequest {
        file_content: b"age,income\n30,100\n".to_vec(),
        file_name: file_name.to_string(),
        selection: vec!["descriptive_stats".to_string()],
        timeout,
    }
}

#[tokio::test]
async fn test_analyze_maps_report() {
    let svc = ScriptedEngine::default();
    let engine = start_engine(svc.clone()).await;

    let report = engine
        .analyze(request("f.csv", Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(report.descriptives.len(), 1);
    assert_eq!(report.descriptives[0].variable_name, "age");
    let correlation = report.correlation.unwrap();
    assert_eq!(correlation.pearson[0].coefficient, 0.8);
    assert_eq!(
        svc.seen_selections.lock().unwrap().as_slice(),
        &[vec!["descriptive_stats".to_string()]]
    );
}

#[tokio::test]
async fn test_status_codes_are_classified() {
    let engine = start_engine(ScriptedEngine::default()).await;

    let bad = engine
        .analyze(request("bad.csv", Duration::from_secs(5)))
        .await
        .unwrap_err();
    assert!(matches!(bad, EngineError::InvalidArgument { .. }));

    let precondition = engine
        .analyze(request("sheet.xlsx", Duration::from_secs(5)))
        .await
        .unwrap_err();
    assert!(matches!(precondition, EngineError::FailedPrecondition { .. }));

    let crash = engine
        .analyze(request("crash.csv", Duration::from_secs(5)))
        .await
        .unwrap_err();
    assert!(matches!(crash, EngineError::Internal { .. }));
}

#[tokio::test]
async fn test_timeout_surfaces_as_deadline_exceeded() {
    let engine = start_engine(ScriptedEngine::default()).await;

    // Local and wire deadlines share one budget; either may fire first.
    for _ in 0..5 {
        let err = engine
            .analyze(request("slow.csv", Duration::from_millis(200)))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::DeadlineExceeded { .. }), "{:?}", err);
    }
}

#[tokio::test]
async fn test_column_discovery_round_trip() {
    let engine = start_engine(ScriptedEngine::default()).await;

    let report = engine
        .analyze(columns_request(
            b"age,income\n".to_vec(),
            "f.csv".to_string(),
            Duration::from_secs(5),
        ))
        .await
        .unwrap();

    assert_eq!(parse_columns(&report.processing_log), vec!["age", "income"]);
}

#[tokio::test]
async fn test_unreachable_engine_is_not_a_client_error() {
    let engine = GrpcAnalysisEngine::connect_lazy(&EngineConfig {
        address: "http://127.0.0.1:1".to_string(),
        connect_timeout_seconds: 1,
        ..Default::default()
    })
    .unwrap();

    let err = engine
        .analyze(request("f.csv", Duration::from_secs(3)))
        .await
        .unwrap_err();

    assert!(!err.is_client_error());
}
