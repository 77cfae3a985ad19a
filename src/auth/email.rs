//! Email/password authentication provider for lectern.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::credentials::CredentialVerifier;
use super::session::{AuthError, AuthSession};
use super::token::AuthToken;
use crate::db::{DbPool, Role, User, UserRepository};

/// Authenticates (email, password) pairs against an injected credential
/// store and maintains the matching account in the user collection.
pub struct EmailProvider {
    pool: DbPool,
    verifier: Arc<dyn CredentialVerifier>,
    session_lifetime: Duration,
}

impl EmailProvider {
    /// Create a provider over the given pool and credential store.
    pub fn new(
        pool: DbPool,
        verifier: Arc<dyn CredentialVerifier>,
        session_lifetime: Duration,
    ) -> Self {
        Self {
            pool,
            verifier,
            session_lifetime,
        }
    }

    /// Authenticate an email/password pair.
    ///
    /// On first success for an email, a Member-role account is created; on
    /// later successes `last_login` is stamped. Bad credentials and
    /// deactivated accounts are expected failures, never panics.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if !self.verifier.verify(email, password) {
            warn!(email = %email, "Email sign-in failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let repo = UserRepository::new(&self.pool);
        let user = match repo.get_by_email(email).await? {
            Some(user) => {
                if !user.is_active {
                    warn!(email = %email, "Email sign-in refused: account deactivated");
                    return Err(AuthError::AccountInactive);
                }
                repo.update_last_login(&user.id).await?.unwrap_or(user)
            }
            None => {
                let user = User::new(email, display_name(email), Role::Member);
                repo.upsert(&user).await?;
                info!(email = %email, user_id = %user.id, "Created account on first email sign-in");
                user
            }
        };

        let token = AuthToken::issue_with_refresh(self.session_lifetime);
        info!(email = %email, user_id = %user.id, "Email sign-in successful");

        Ok(AuthSession::new(user, token))
    }
}

/// Display name for an account created from nothing but an email address.
fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
