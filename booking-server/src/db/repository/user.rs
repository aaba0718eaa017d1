//! User Repository
//!
//! The stored row carries the password hash; it never leaves this layer
//! except through [`UserRecord::info`].

use chrono::{DateTime, Utc};
use shared::models::{UserInfo, UserRole};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, email, display_name, role, password_hash, created_at, updated_at";

/// Stored user row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Outward-facing view, without the password hash
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserRecord>> {
    let user = sqlx::query_as::<_, UserRecord>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<UserRecord>> {
    let user = sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Create a user. Registration always assigns the `user` role; admins are
/// provisioned out of band.
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    display_name: &str,
    role: UserRole,
    password_hash: &str,
) -> RepoResult<UserRecord> {
    if find_by_email(pool, email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email {email} is already registered"
        )));
    }

    let now = Utc::now();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, display_name, role, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(email)
    .bind(display_name)
    .bind(role)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}
