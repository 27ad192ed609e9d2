//! Authentication presentation layer

pub mod controller;
pub mod extractors;
pub mod middleware;
pub mod models;

pub use controller::*;
pub use extractors::*;
pub use middleware::*;
pub use models::*;
