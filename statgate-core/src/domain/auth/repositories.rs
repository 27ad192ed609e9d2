//! Authentication repository traits

use async_trait::async_trait;

use super::entities::{NewUser, User};
use super::errors::AuthError;
use super::value_objects::{Email, UserId};

/// User repository trait for user persistence
#[async_trait]
pub trait IUserRepository: Send + Sync {
    /// Find a user by email address (exact match)
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

    /// Find a user by user ID
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, AuthError>;

    /// Create a new user and return it with its assigned id.
    ///
    /// Fails with `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: &NewUser) -> Result<User, AuthError>;

    /// Persist the mutable fields of an existing user
    async fn update(&self, user: &User) -> Result<(), AuthError>;
}
