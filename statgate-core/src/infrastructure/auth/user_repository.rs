//! SQLx implementation of the credential store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::auth::{
    entities::{NewUser, User},
    errors::AuthError,
    repositories::IUserRepository,
    value_objects::{Email, PasswordHash, UserId},
};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email.clone())
            .map_err(|_| AuthError::InvalidEmail { email: row.email })?;
        Ok(User {
            user_id: UserId::from(row.id),
            email,
            password_hash: PasswordHash::from(row.password_hash),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_db_error(context: &str, e: sqlx::Error) -> AuthError {
    tracing::error!("Database error {}: {}", context, e);
    let error_msg = e.to_string();
    if error_msg.contains("relation") && error_msg.contains("does not exist") {
        AuthError::database(format!(
            "Database table 'users' does not exist. Please run migrations: {}",
            error_msg
        ))
    } else {
        AuthError::database(format!("Database error while {}: {}", context, error_msg))
    }
}

fn is_email_conflict(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.constraint())
        .is_some_and(|constraint| constraint == EMAIL_UNIQUE_CONSTRAINT)
}

/// SQLx implementation of `IUserRepository`
pub struct SqlxUserRepository {
    pool: Arc<PgPool>,
}

impl SqlxUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IUserRepository for SqlxUserRepository {
    #[tracing::instrument(skip(self), fields(email = %email.as_str()))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_db_error("finding user by email", e))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_db_error("finding user by id", e))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip(self, user), fields(email = %user.email.as_str()))]
    async fn create(&self, user: &NewUser) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| {
            if is_email_conflict(&e) {
                return AuthError::EmailAlreadyExists {
                    email: user.email.as_str().to_string(),
                };
            }
            map_db_error("creating user", e)
        })?;

        User::try_from(row)
    }

    #[tracing::instrument(skip(self, user), fields(user_id = %user.user_id))]
    async fn update(&self, user: &User) -> Result<(), AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_i64())
        .bind(user.password_hash.as_str())
        .bind(user.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_db_error("updating user", e))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserIdNotFound {
                user_id: user.user_id.to_string(),
            });
        }

        Ok(())
    }
}
