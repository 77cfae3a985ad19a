//! Google OAuth authentication provider for lectern.
//!
//! Exchanges an externally obtained access token for an identity via the
//! provider's token-introspection endpoint. The crate never sees OAuth
//! client secrets or runs the authorization flow; the host UI does that
//! and hands the resulting token here.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::session::{AuthError, AuthSession};
use super::token::AuthToken;
use crate::config::AuthConfig;
use crate::db::{DbPool, Role, User, UserRepository};
use crate::{LecternError, Result};

/// Identity fields returned by the introspection endpoint.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    /// Some endpoint versions return a bool, others the string "true".
    #[serde(default)]
    email_verified: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl TokenInfo {
    fn email_is_verified(&self) -> bool {
        match &self.email_verified {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }
}

/// Authenticates Google access tokens via token introspection.
pub struct GoogleProvider {
    pool: DbPool,
    http: reqwest::Client,
    introspection_url: String,
    session_lifetime: Duration,
}

impl GoogleProvider {
    /// Create a provider over the given pool, configured from `AuthConfig`.
    ///
    /// The HTTP client carries a bounded timeout so an unreachable
    /// identity provider fails the sign-in instead of hanging it.
    pub fn new(pool: DbPool, config: &AuthConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.introspection_timeout_secs))
            .build()
            .map_err(|e| LecternError::Http(e.to_string()))?;

        Ok(Self {
            pool,
            http,
            introspection_url: config.introspection_url.trim_end_matches('/').to_string(),
            session_lifetime: Duration::from_secs(config.session_secs),
        })
    }

    /// Authenticate an externally obtained Google access token.
    ///
    /// New identities become Member-role accounts keyed by email; known
    /// emails are signed in and `last_login` stamped. Introspection
    /// failures of any kind are expected failures.
    pub async fn authenticate(
        &self,
        google_token: &str,
    ) -> std::result::Result<AuthSession, AuthError> {
        let identity = self.introspect(google_token).await?;

        let email = match &identity.email {
            Some(email) if identity.email_is_verified() => email.clone(),
            _ => {
                warn!(subject = ?identity.sub, "Google sign-in refused: email missing or unverified");
                return Err(AuthError::UnverifiedEmail);
            }
        };

        let repo = UserRepository::new(&self.pool);
        let user = match repo.get_by_email(&email).await? {
            Some(user) => {
                if !user.is_active {
                    warn!(email = %email, "Google sign-in refused: account deactivated");
                    return Err(AuthError::AccountInactive);
                }
                repo.update_last_login(&user.id).await?.unwrap_or(user)
            }
            None => {
                let name = identity.name.clone().unwrap_or_else(|| email.clone());
                let mut user = User::new(&email, name, Role::Member);
                if let Some(picture) = identity.picture.clone() {
                    user = user.with_avatar(picture);
                }
                repo.upsert(&user).await?;
                info!(email = %email, user_id = %user.id, "Created account on first Google sign-in");
                user
            }
        };

        let token = AuthToken::issue_with_refresh(self.session_lifetime);
        info!(email = %email, user_id = %user.id, "Google sign-in successful");

        Ok(AuthSession::new(user, token))
    }

    /// Call the token-introspection endpoint.
    async fn introspect(&self, token: &str) -> std::result::Result<TokenInfo, AuthError> {
        let url = format!("{}/tokeninfo", self.introspection_url);

        let response = self
            .http
            .get(&url)
            .query(&[("access_token", token)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Token introspection request failed");
                AuthError::TokenVerification
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Token introspection rejected");
            return Err(AuthError::TokenVerification);
        }

        let info: TokenInfo = response.json().await.map_err(|e| {
            warn!(error = %e, "Token introspection response unreadable");
            AuthError::TokenVerification
        })?;

        debug!(subject = ?info.sub, "Token introspection succeeded");
        Ok(info)
    }
}
