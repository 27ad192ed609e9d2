//! Authentication infrastructure services

pub mod jwt_service;
pub mod password_hasher;
pub mod user_repository;

pub use jwt_service::JwtService;
pub use password_hasher::PasswordHasher;
pub use user_repository::SqlxUserRepository;
