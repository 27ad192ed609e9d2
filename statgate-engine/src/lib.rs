//! StatGate Engine - client for the remote statistical analysis engine
//!
//! - [`domain`]: Report model, [`AnalysisEngine`] trait, failure classification
//! - [`infrastructure`]: tonic implementation over `statgate.engine.v1.AnalysisService`

pub mod domain;
pub mod infrastructure;

/// Generated protobuf and gRPC types
pub mod pb {
    tonic::include_proto!("statgate.engine.v1");
}

pub use domain::*;
pub use infrastructure::GrpcAnalysisEngine;
