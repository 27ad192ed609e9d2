//! Domain layer

pub mod analysis;
pub mod auth;
