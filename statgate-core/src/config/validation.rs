//! Configuration validation module

use crate::config::{AuthConfig, DatabaseConfig, EngineConfig, LoggingConfig, ServerConfig};

/// Minimum HMAC secret length accepted for token signing.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Database configuration error: {message}")]
    Database { message: String },

    #[error("Authentication configuration error: {message}")]
    Auth { message: String },

    #[error("Engine configuration error: {message}")]
    Engine { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, only 0 is out of range
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0",
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(ValidationError::server(
                "Max upload size must be greater than 0 bytes",
            ));
        }

        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::database("Database URL cannot be empty"));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::database(
                "Database URL must start with postgres:// or postgresql://",
            ));
        }

        if self.max_connections == 0 {
            return Err(ValidationError::database(
                "Max connections must be greater than 0",
            ));
        }

        if let Some(min_idle) = self.min_idle
            && min_idle > self.max_connections
        {
            return Err(ValidationError::database(format!(
                "min_idle ({}) cannot exceed max_connections ({})",
                min_idle, self.max_connections
            )));
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::auth(format!(
                "JWT secret must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.token_ttl_minutes == 0 {
            return Err(ValidationError::auth(
                "Token TTL must be greater than 0 minutes",
            ));
        }

        if self.issuer.trim().is_empty() {
            return Err(ValidationError::auth("Token issuer cannot be empty"));
        }

        if self.min_password_length == 0 {
            return Err(ValidationError::auth(
                "Minimum password length must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err(ValidationError::engine(format!(
                "Engine address must start with http:// or https://, got: {}",
                self.address
            )));
        }

        if self.analyze_timeout_seconds == 0 || self.columns_timeout_seconds == 0 {
            return Err(ValidationError::engine(
                "Engine call timeouts must be greater than 0 seconds",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ValidationError::engine(
                "Engine connect timeout must be greater than 0 seconds",
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "pretty" | "compact" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected json, pretty or compact",
                other
            ))),
        }
    }
}
