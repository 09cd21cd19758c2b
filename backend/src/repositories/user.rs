//! User repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Failure to insert a user
#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("username or email already taken")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage for user records
///
/// Username and email are each unique across all records. `insert` is the
/// authoritative uniqueness check and must report a collision as
/// [`CreateUserError::Duplicate`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user whose username equals `username` or whose email
    /// equals `email`
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, sqlx::Error>;

    /// Persist a new user
    async fn insert(&self, user: NewUser) -> Result<UserRecord, CreateUserError>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> anyhow::Result<()>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1 OR email = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, CreateUserError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                CreateUserError::Duplicate
            }
            other => CreateUserError::Database(other),
        })
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        crate::db::health_check(&self.pool).await
    }
}
