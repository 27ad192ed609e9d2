//! Engine transport implementations

pub mod grpc_client;

pub use grpc_client::GrpcAnalysisEngine;
