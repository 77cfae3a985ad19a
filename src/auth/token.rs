//! Auth token issuance for lectern.
//!
//! Tokens are opaque credentials with an absolute expiry instant. They are
//! not verified by any server; they stand in for the session once issued
//! and are checked only against the clock.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime for email and OAuth sign-ins (24 hours).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Session lifetime for admin sign-ins (8 hours).
pub const ADMIN_SESSION_DURATION_SECS: u64 = 8 * 60 * 60;

/// Opaque session credential with an absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Opaque access token, unique per issuance.
    pub access_token: String,
    /// Opaque refresh token, if the issuing provider hands one out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absolute expiry instant in epoch milliseconds.
    pub expires_at: i64,
}

impl AuthToken {
    /// Issue a token without a refresh token.
    ///
    /// Every issuance produces a fresh access token; tokens are never
    /// reused across sign-ins, even for the same user.
    pub fn issue(lifetime: Duration) -> Self {
        Self {
            access_token: Uuid::new_v4().to_string(),
            refresh_token: None,
            expires_at: Utc::now().timestamp_millis() + lifetime.as_millis() as i64,
        }
    }

    /// Issue a token with a refresh token.
    pub fn issue_with_refresh(lifetime: Duration) -> Self {
        Self {
            refresh_token: Some(Uuid::new_v4().to_string()),
            ..Self::issue(lifetime)
        }
    }

    /// Check if the token is expired at the given instant (epoch ms).
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    /// Check if the token is expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    /// Remaining lifetime, or `None` if expired.
    pub fn remaining(&self) -> Option<Duration> {
        let remaining_ms = self.expires_at - Utc::now().timestamp_millis();
        if remaining_ms > 0 {
            Some(Duration::from_millis(remaining_ms as u64))
        } else {
            None
        }
    }
}
