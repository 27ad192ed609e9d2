//! StatGate Core - configuration, identity and run ledger
//!
//! # Modules
//!
//! - [`config`]: Typed configuration layered from files and environment
//! - [`domain`]: Users, identity tokens, analysis runs and their results
//! - [`application`]: Authentication use cases and the error taxonomy
//! - [`infrastructure`]: JWT, Argon2 and PostgreSQL implementations
//! - [`logging`]: Structured logging with tracing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
