//! Session store for lectern.
//!
//! Persists the current session as exactly two JSON records: the signed-in
//! user and their token. Both rows are written in one transaction so a
//! reader never observes a half-written session.

use tracing::debug;

use super::user::User;
use super::DbPool;
use crate::auth::AuthToken;
use crate::{LecternError, Result};

const USER_SLOT: &str = "current_user";
const TOKEN_SLOT: &str = "auth_token";

/// Repository for the persisted current session.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new SessionRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Persist the session, replacing any previous one.
    pub async fn save(&self, user: &User, token: &AuthToken) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        let token_json = serde_json::to_string(token)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;

        for (slot, value) in [(USER_SLOT, &user_json), (TOKEN_SLOT, &token_json)] {
            sqlx::query(
                "INSERT INTO session (slot, value) VALUES (?, ?)
                 ON CONFLICT(slot) DO UPDATE SET value = excluded.value",
            )
            .bind(slot)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;

        debug!(user_id = %user.id, "Session persisted");
        Ok(())
    }

    /// Load the persisted session.
    ///
    /// Returns `Ok(None)` if either record is absent. A record that is
    /// present but unparsable surfaces as a serialization error; callers
    /// treat that as a corrupt store and clear it.
    pub async fn load(&self) -> Result<Option<(User, AuthToken)>> {
        let user_json = self.slot_value(USER_SLOT).await?;
        let token_json = self.slot_value(TOKEN_SLOT).await?;

        match (user_json, token_json) {
            (Some(user_json), Some(token_json)) => {
                let user: User = serde_json::from_str(&user_json)?;
                let token: AuthToken = serde_json::from_str(&token_json)?;
                Ok(Some((user, token)))
            }
            _ => Ok(None),
        }
    }

    /// Remove the persisted session. A no-op when nothing is stored.
    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM session")
            .execute(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;

        debug!("Session cleared");
        Ok(())
    }

    async fn slot_value(&self, slot: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM session WHERE slot = ?")
            .bind(slot)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| LecternError::Database(e.to_string()))?;
        Ok(value)
    }
}
