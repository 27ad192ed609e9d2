//! Engine domain: report model, failure classification and the engine trait

pub mod columns;
pub mod engine;
pub mod error;
pub mod report;

pub use columns::{COLUMNS_LOG_PREFIX, COLUMNS_MARKER_SELECTION, columns_request, parse_columns};
pub use engine::{AnalysisEngine, EngineRequest};
pub use error::EngineError;
pub use report::*;
