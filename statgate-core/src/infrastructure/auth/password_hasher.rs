//! Password hashing service using Argon2id

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash as Argon2Hash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::domain::auth::{errors::AuthError, value_objects::PasswordHash};

/// Argon2id password hasher
///
/// Hashing and verification run on the blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with explicit cost parameters (memory in KiB)
    pub fn with_params(memory_cost: u32, time_cost: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_cost, time_cost, parallelism, None).map_err(|e| {
            AuthError::Hashing {
                reason: format!("invalid Argon2 parameters: {}", e),
            }
        })?;
        Ok(Self { params })
    }

    /// Hash on the calling thread
    pub fn hash_blocking(&self, password: &str) -> Result<PasswordHash, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
            .hash_password(password.as_bytes(), &salt)
            .map(|h| PasswordHash::from(h.to_string()))
            .map_err(|e| {
                tracing::error!("Failed to hash password: {}", e);
                AuthError::Hashing {
                    reason: e.to_string(),
                }
            })
    }

    pub async fn hash(&self, password: String) -> Result<PasswordHash, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(|e| {
                tracing::error!("Password hash task panicked: {}", e);
                AuthError::Hashing {
                    reason: "hash task failed".to_string(),
                }
            })?
    }

    /// Check a password against a stored PHC hash.
    ///
    /// A stored hash that cannot be parsed verifies as `false`.
    pub async fn verify(&self, password: String, hash: PasswordHash) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || match Argon2Hash::new(hash.as_str()) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!("Failed to parse stored password hash: {}", e);
                false
            }
        })
        .await
        .map_err(|e| {
            tracing::error!("Password verify task panicked: {}", e);
            AuthError::Hashing {
                reason: "verify task failed".to_string(),
            }
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("test_password_123".to_string()).await.unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(
            hasher
                .verify("test_password_123".to_string(), hash.clone())
                .await
                .unwrap()
        );
        assert!(!hasher.verify("wrong_password".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = fast_hasher();
        let first = hasher.hash("same_password".to_string()).await.unwrap();
        let second = hasher.hash("same_password".to_string()).await.unwrap();
        assert_ne!(first.as_str(), second.as_str());
    }

    #[tokio::test]
    async fn test_unparseable_hash_does_not_verify() {
        let hasher = fast_hasher();
        let verified = hasher
            .verify("anything".to_string(), PasswordHash::new("plain-text".to_string()))
            .await
            .unwrap();
        assert!(!verified);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        assert!(PasswordHasher::with_params(0, 0, 0).is_err());
    }
}
