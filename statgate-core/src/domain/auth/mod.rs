//! Authentication domain module
//!
//! Contains domain entities, value objects, errors, and repository traits
//! for user accounts and identity tokens.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use value_objects::*;
