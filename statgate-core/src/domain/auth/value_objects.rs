//! Authentication value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User ID value object, assigned by the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Store-assigned ids start at 1.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email value object with validation
///
/// Surrounding whitespace is trimmed; case is kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 255;

    /// Create a new Email with validation
    pub fn new(email: String) -> Result<Self, String> {
        let email = email.trim().to_string();

        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }

        if email.len() > Self::MAX_LEN {
            return Err(format!("Email too long (max {} characters)", Self::MAX_LEN));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err("Invalid email format: missing @ symbol".to_string());
        };

        if domain.contains('@') {
            return Err("Invalid email format: multiple @ symbols".to_string());
        }

        if local.is_empty() {
            return Err("Invalid email format: empty local part".to_string());
        }

        if domain.is_empty() {
            return Err("Invalid email format: empty domain part".to_string());
        }

        if email.chars().any(char::is_whitespace) {
            return Err("Invalid email format: contains whitespace".to_string());
        }

        Ok(Email(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Password hash value object (never exposes raw hash)
///
/// Deliberately has no `Display` or `Serialize` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Access the PHC string for verification and persistence only.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PasswordHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Identity token claims
///
/// `sub` is the string-encoded user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: UserId, issued_at: i64, expires_at: i64, issuer: impl Into<String>) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: expires_at,
            iss: issuer.into(),
        }
    }
}

/// Identity bound to a request once its token has been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_keeps_case_and_trims() {
        let email = Email::new("  Alice@Example.com ".to_string()).unwrap();
        assert_eq!(email.as_str(), "Alice@Example.com");
        assert_ne!(
            email,
            Email::new("alice@example.com".to_string()).unwrap()
        );
    }

    #[test]
    fn test_email_rejects_malformed_input() {
        assert!(Email::new(String::new()).is_err());
        assert!(Email::new("no-at-symbol".to_string()).is_err());
        assert!(Email::new("@example.com".to_string()).is_err());
        assert!(Email::new("user@".to_string()).is_err());
        assert!(Email::new("a@b@c".to_string()).is_err());
        assert!(Email::new("a b@example.com".to_string()).is_err());
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId::new(42));
        assert!("abc".parse::<UserId>().is_err());
        assert!(!UserId::new(0).is_valid());
        assert!(UserId::new(1).is_valid());
    }

    #[test]
    fn test_password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret".to_string());
        assert!(!format!("{:?}", hash).contains("secret"));
    }
}
