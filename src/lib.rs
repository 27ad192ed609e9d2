//! StatGate - authenticated gateway for a remote statistical analysis engine
//!
//! This is the main binary crate that wires together all modules

mod app;

pub use app::{AppHandle, build_app, create_app};
pub use statgate_core::{Config, init_tracing};

// Re-export for convenience
pub use statgate_core;
pub use statgate_engine;
pub use statgate_orchestrator;
