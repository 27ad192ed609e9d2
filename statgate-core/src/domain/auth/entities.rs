//! Authentication domain entities

use chrono::{DateTime, Utc};

use super::value_objects::*;

/// User aggregate root
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned user identifier
    pub user_id: UserId,
    /// User email address
    pub email: Email,
    /// Hashed password (never expose raw hash)
    pub password_hash: PasswordHash,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Update password hash
    pub fn update_password_hash(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// User that has not been persisted yet; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: Email, password_hash: PasswordHash) -> Self {
        Self {
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_password_hash_bumps_timestamp() {
        let created = Utc::now() - chrono::Duration::hours(1);
        let mut user = User {
            user_id: UserId::new(7),
            email: Email::new("user@example.com".to_string()).unwrap(),
            password_hash: PasswordHash::new("old".to_string()),
            created_at: created,
            updated_at: created,
        };

        user.update_password_hash(PasswordHash::new("new".to_string()));

        assert_eq!(user.password_hash.as_str(), "new");
        assert!(user.updated_at > created);
        assert_eq!(user.created_at, created);
    }
}
