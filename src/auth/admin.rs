//! Admin authentication provider for lectern.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::credentials::CredentialVerifier;
use super::session::{AuthError, AuthSession};
use super::token::AuthToken;
use crate::db::{DbPool, Role, User, UserRepository};

/// Authenticates the platform administrator.
///
/// The Admin-role account is unique (zero or one exists) and is keyed by
/// role, not by id: it is created lazily on the first successful admin
/// sign-in and reused afterward.
pub struct AdminProvider {
    pool: DbPool,
    verifier: Arc<dyn CredentialVerifier>,
    session_lifetime: Duration,
    admin_email: String,
}

impl AdminProvider {
    /// Create a provider over the given pool and credential store.
    pub fn new(
        pool: DbPool,
        verifier: Arc<dyn CredentialVerifier>,
        session_lifetime: Duration,
        admin_email: String,
    ) -> Self {
        Self {
            pool,
            verifier,
            session_lifetime,
            admin_email,
        }
    }

    /// Authenticate an admin username/password pair.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if !self.verifier.verify(username, password) {
            warn!(username = %username, "Admin sign-in failed: invalid credentials");
            return Err(AuthError::InvalidAdminCredentials);
        }

        let repo = UserRepository::new(&self.pool);
        let user = match repo.get_by_role(Role::Admin).await? {
            Some(user) => {
                if !user.is_active {
                    warn!(username = %username, "Admin sign-in refused: account deactivated");
                    return Err(AuthError::AccountInactive);
                }
                repo.update_last_login(&user.id).await?.unwrap_or(user)
            }
            None => {
                let user = User::new(&self.admin_email, "System Administrator", Role::Admin);
                repo.upsert(&user).await?;
                info!(user_id = %user.id, "Created admin account on first sign-in");
                user
            }
        };

        let token = AuthToken::issue_with_refresh(self.session_lifetime);
        info!(user_id = %user.id, "Admin sign-in successful");

        Ok(AuthSession::new(user, token))
    }
}
