//! Application layer

pub mod auth;
pub mod errors;

pub use errors::{ApplicationError, ErrorKind};
