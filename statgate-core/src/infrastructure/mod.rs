//! Infrastructure layer: persistence and credential primitives

pub mod analysis;
pub mod auth;
pub mod database;

pub use analysis::SqlxAnalysisRunRepository;
pub use auth::{JwtService, PasswordHasher, SqlxUserRepository};
pub use database::{DatabaseInitError, create_lazy_pool, create_pool, ping, run_migrations};
