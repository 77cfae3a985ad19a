//! User repository for lectern.
//!
//! Users persist as JSON documents with indexed scalar columns for the
//! lookups the auth providers need. All writes go through `upsert`, which
//! keeps the index columns and the document in step.

use chrono::Utc;
use tracing::debug;

use super::user::{Role, User};
use super::DbPool;
use crate::{LecternError, Result};

/// Repository for user collection operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert or update a user, keyed by id.
    pub async fn upsert(&self, user: &User) -> Result<()> {
        let doc = serde_json::to_string(user)?;

        sqlx::query(
            "INSERT INTO users (id, email, role, is_active, doc)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 email = excluded.email,
                 role = excluded.role,
                 is_active = excluded.is_active,
                 doc = excluded.doc",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(&doc)
        .execute(self.pool)
        .await
        .map_err(|e| LecternError::Database(e.to_string()))?;

        debug!(user_id = %user.id, email = %user.email, "User upserted");
        Ok(())
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let doc: Option<String> = sqlx::query_scalar("SELECT doc FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;

        Self::parse_doc(doc)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let doc: Option<String> = sqlx::query_scalar("SELECT doc FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;

        Self::parse_doc(doc)
    }

    /// Get a user by role.
    ///
    /// Roles holding at most one account (Admin) are looked up this way;
    /// for other roles the first match by insertion order is returned.
    pub async fn get_by_role(&self, role: Role) -> Result<Option<User>> {
        let doc: Option<String> =
            sqlx::query_scalar("SELECT doc FROM users WHERE role = ? ORDER BY rowid LIMIT 1")
                .bind(role.as_str())
                .fetch_optional(self.pool)
                .await
                .map_err(|e| LecternError::Database(e.to_string()))?;

        Self::parse_doc(doc)
    }

    /// Stamp `last_login = now` on a user.
    ///
    /// Returns the updated user, or `None` if no such user exists.
    pub async fn update_last_login(&self, id: &str) -> Result<Option<User>> {
        let user = match self.get_by_id(id).await? {
            Some(mut user) => {
                user.last_login = Utc::now();
                self.upsert(&user).await?;
                Some(user)
            }
            None => None,
        };
        Ok(user)
    }

    /// Set the active flag on a user.
    ///
    /// Returns the updated user, or `None` if no such user exists.
    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<Option<User>> {
        let user = match self.get_by_id(id).await? {
            Some(mut user) => {
                user.is_active = is_active;
                self.upsert(&user).await?;
                Some(user)
            }
            None => None,
        };
        Ok(user)
    }

    /// List all users.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let docs: Vec<String> = sqlx::query_scalar("SELECT doc FROM users ORDER BY rowid")
            .fetch_all(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;

        docs.into_iter()
            .map(|doc| serde_json::from_str(&doc).map_err(LecternError::Serialization))
            .collect()
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Count users holding a role.
    pub async fn count_by_role(&self, role: Role) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?")
            .bind(role.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Check if an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;
        Ok(exists != 0)
    }

    fn parse_doc(doc: Option<String>) -> Result<Option<User>> {
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }
}
