//! Authentication use cases

use std::sync::Arc;

use crate::domain::auth::{
    entities::NewUser,
    errors::AuthError,
    repositories::IUserRepository,
    value_objects::{AuthenticatedUser, Email, PasswordHash, UserId},
};
use crate::infrastructure::auth::{JwtService, PasswordHasher};

const DECOY_PASSWORD: &str = "statgate-decoy-password";

/// Result of successful user registration
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user_id: UserId,
    pub email: Email,
}

/// Result type for login operations
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user_id: UserId,
    pub email: Email,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

fn parse_email(email: &str) -> Result<Email, AuthError> {
    Email::new(email.to_string()).map_err(|_| AuthError::InvalidEmail {
        email: email.to_string(),
    })
}

fn check_password_strength(password: &str, min_length: usize) -> Result<(), AuthError> {
    if password.chars().count() < min_length {
        return Err(AuthError::WeakPassword { min_length });
    }
    Ok(())
}

/// Use case for registering new users
pub struct RegisterUserUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    min_password_length: usize,
}

impl RegisterUserUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        min_password_length: usize,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            min_password_length,
        }
    }

    pub async fn execute(&self, email: &str, password: String) -> Result<RegisterResult, AuthError> {
        let email = parse_email(email)?;
        check_password_strength(&password, self.min_password_length)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists {
                email: email.into_string(),
            });
        }

        let password_hash = self.password_hasher.hash(password).await?;
        // The unique constraint still guards a concurrent registration.
        let user = self
            .user_repository
            .create(&NewUser::new(email, password_hash))
            .await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterResult {
            user_id: user.user_id,
            email: user.email,
        })
    }
}

/// Use case for user login
///
/// Unknown emails and wrong passwords are indistinguishable to the caller:
/// both fail with `InvalidCredentials` after one hash verification.
pub struct LoginUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
    decoy_hash: PasswordHash,
}

impl LoginUseCase {
    /// Build the use case, hashing the decoy password up front so the first
    /// unknown-email login costs the same as any other.
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Result<Self, AuthError> {
        let decoy_hash = password_hasher.hash_blocking(DECOY_PASSWORD)?;
        Ok(Self {
            user_repository,
            password_hasher,
            jwt_service,
            decoy_hash,
        })
    }

    pub async fn execute(&self, email: &str, password: String) -> Result<LoginResult, AuthError> {
        let Ok(email) = Email::new(email.to_string()) else {
            self.burn_decoy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            self.burn_decoy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let is_valid = self
            .password_hasher
            .verify(password, user.password_hash.clone())
            .await?;
        if !is_valid {
            tracing::debug!(user_id = %user.user_id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_service.issue(user.user_id)?;

        Ok(LoginResult {
            token,
            user_id: user.user_id,
            email: user.email,
            expires_in: self.jwt_service.expires_in_seconds(),
        })
    }

    async fn burn_decoy(&self, password: String) -> Result<(), AuthError> {
        self.password_hasher
            .verify(password, self.decoy_hash.clone())
            .await?;
        Ok(())
    }
}

/// Use case for changing the caller's password
pub struct ChangePasswordUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    min_password_length: usize,
}

impl ChangePasswordUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        min_password_length: usize,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            min_password_length,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        current_password: String,
        new_password: String,
    ) -> Result<(), AuthError> {
        if !user_id.is_valid() {
            return Err(AuthError::MissingIdentity);
        }
        if current_password.is_empty() {
            return Err(AuthError::MissingField {
                field: "current_password",
            });
        }

        let mut user = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::UserIdNotFound {
                user_id: user_id.to_string(),
            })?;

        let is_valid = self
            .password_hasher
            .verify(current_password, user.password_hash.clone())
            .await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        check_password_strength(&new_password, self.min_password_length)?;

        let password_hash = self.password_hasher.hash(new_password).await?;
        user.update_password_hash(password_hash);
        self.user_repository.update(&user).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

/// Use case for validating identity tokens
pub struct ValidateTokenUseCase {
    jwt_service: Arc<JwtService>,
}

impl ValidateTokenUseCase {
    pub fn new(jwt_service: Arc<JwtService>) -> Self {
        Self { jwt_service }
    }

    pub fn execute(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let user_id = self.jwt_service.verify(token)?;
        Ok(AuthenticatedUser::new(user_id))
    }
}
