//! Authentication manager for lectern.
//!
//! `AuthManager` orchestrates the providers, owns the in-memory copy of
//! the current session, and answers permission and role queries. It is an
//! explicitly constructed service: the host's composition root builds one
//! over a `Database` and hands it around. There is no global instance.
//!
//! The permission model here is advisory. The store, the tokens, and the
//! checks all run inside the consuming process with no server
//! verifying anything, so this is a convenience cache for UI decisions,
//! not a security boundary.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::admin::AdminProvider;
use super::credentials::{CredentialVerifier, StaticCredentials};
use super::email::EmailProvider;
use super::google::GoogleProvider;
use super::session::{AuthError, AuthSession};
use super::token::AuthToken;
use crate::config::AuthConfig;
use crate::db::{Database, Role, SessionRepository, User};
use crate::rbac;
use crate::{LecternError, Result};

/// Process-wide session and permission authority.
///
/// Two states: Anonymous (no session) and Authenticated (one unexpired
/// session). Expiry is observed lazily: the first query that sees an
/// expired token clears the session; there is no background timer.
pub struct AuthManager {
    db: Database,
    email: EmailProvider,
    admin: AdminProvider,
    google: GoogleProvider,
    // The single critical section guarding the current session.
    session: RwLock<Option<AuthSession>>,
}

impl AuthManager {
    /// Build a manager whose credential stores are seeded from the config
    /// (bootstrap demo and admin pairs, hashed at construction).
    pub async fn new(db: Database, config: &AuthConfig) -> Result<Self> {
        let email_verifier: Arc<dyn CredentialVerifier> = Arc::new(
            StaticCredentials::new()
                .with(&config.demo_email, &config.demo_password)
                .map_err(|e| LecternError::Config(format!("bootstrap credential: {e}")))?,
        );
        let admin_verifier: Arc<dyn CredentialVerifier> = Arc::new(
            StaticCredentials::new()
                .with(&config.admin_username, &config.admin_password)
                .map_err(|e| LecternError::Config(format!("bootstrap credential: {e}")))?,
        );

        Self::with_verifiers(db, config, email_verifier, admin_verifier).await
    }

    /// Build a manager with injected credential stores.
    ///
    /// Deployments with a real credential backend use this constructor and
    /// ignore the bootstrap pairs in the config.
    pub async fn with_verifiers(
        db: Database,
        config: &AuthConfig,
        email_verifier: Arc<dyn CredentialVerifier>,
        admin_verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self> {
        let email = EmailProvider::new(
            db.pool().clone(),
            email_verifier,
            Duration::from_secs(config.session_secs),
        );
        let admin = AdminProvider::new(
            db.pool().clone(),
            admin_verifier,
            Duration::from_secs(config.admin_session_secs),
            config.admin_email.clone(),
        );
        let google = GoogleProvider::new(db.pool().clone(), config)?;

        let manager = Self {
            db,
            email,
            admin,
            google,
            session: RwLock::new(None),
        };
        manager.restore_session().await;

        Ok(manager)
    }

    /// Re-hydrate the session from the store at construction time.
    ///
    /// A stored session that is expired or unreadable leaves the manager
    /// Anonymous and proactively clears the store so the condition does
    /// not recur on the next start.
    async fn restore_session(&self) {
        let repo = SessionRepository::new(self.db.pool());

        let restored = match repo.load().await {
            Ok(Some((user, token))) => {
                if token.is_expired() {
                    info!(user_id = %user.id, "Stored session expired, clearing");
                    if let Err(e) = repo.clear().await {
                        warn!(error = %e, "Failed to clear expired stored session");
                    }
                    None
                } else {
                    info!(user_id = %user.id, "Session restored from store");
                    Some(AuthSession::new(user, token))
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Stored session unreadable, clearing");
                if let Err(e) = repo.clear().await {
                    warn!(error = %e, "Failed to clear corrupt stored session");
                }
                None
            }
        };

        *self.session.write().await = restored;
    }

    /// Sign in with an email/password pair.
    pub async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<AuthSession, AuthError> {
        let session = self.email.authenticate(email, password).await?;
        Ok(self.install(session).await)
    }

    /// Sign in as the platform administrator.
    pub async fn sign_in_as_admin(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<AuthSession, AuthError> {
        let session = self.admin.authenticate(username, password).await?;
        Ok(self.install(session).await)
    }

    /// Sign in with an externally obtained Google access token.
    pub async fn sign_in_with_google(
        &self,
        google_token: &str,
    ) -> std::result::Result<AuthSession, AuthError> {
        let session = self.google.authenticate(google_token).await?;
        Ok(self.install(session).await)
    }

    /// Sign out. Idempotent; never errors.
    pub async fn sign_out(&self) {
        let mut guard = self.session.write().await;
        if let Some(session) = guard.take() {
            info!(user_id = %session.user.id, "Signed out");
        }

        let repo = SessionRepository::new(self.db.pool());
        if let Err(e) = repo.clear().await {
            warn!(error = %e, "Failed to clear stored session on sign-out");
        }
    }

    /// True iff a session exists and is unexpired.
    pub async fn is_authenticated(&self) -> bool {
        self.current_session().await.is_some()
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.current_session().await.map(|s| s.user)
    }

    /// The current token, if any.
    pub async fn current_token(&self) -> Option<AuthToken> {
        self.current_session().await.map(|s| s.token)
    }

    /// Check the current user's permission snapshot.
    ///
    /// False when Anonymous, expired, or deactivated; exact string match
    /// otherwise.
    pub async fn has_permission(&self, resource: &str, action: &str) -> bool {
        match self.current_session().await {
            Some(session) if session.user.is_active => {
                rbac::permissions_allow(&session.user.permissions, resource, action)
            }
            _ => false,
        }
    }

    /// True iff the current user holds the given role.
    pub async fn has_role(&self, role: Role) -> bool {
        self.current_session()
            .await
            .is_some_and(|s| s.user.role == role)
    }

    /// True iff the current user is an Admin.
    pub async fn is_admin(&self) -> bool {
        self.has_role(Role::Admin).await
    }

    /// True iff the current user is a Professor.
    pub async fn is_professor(&self) -> bool {
        self.has_role(Role::Professor).await
    }

    /// True iff the current user is a Reviewer.
    pub async fn is_reviewer(&self) -> bool {
        self.has_role(Role::Reviewer).await
    }

    /// True iff the current user is an Author.
    pub async fn is_author(&self) -> bool {
        self.has_role(Role::Author).await
    }

    /// True iff the current user is a Member.
    pub async fn is_member(&self) -> bool {
        self.has_role(Role::Member).await
    }

    /// True iff the current user can create, update, or delete users.
    pub async fn can_manage_users(&self) -> bool {
        self.has_any_permission("users", &["create", "update", "delete"])
            .await
    }

    /// True iff the current user can create, update, or delete articles.
    pub async fn can_manage_articles(&self) -> bool {
        self.has_any_permission("articles", &["create", "update", "delete"])
            .await
    }

    /// True iff the current user can write or revise reviews.
    pub async fn can_review_articles(&self) -> bool {
        self.has_any_permission("reviews", &["create", "update"]).await
    }

    /// True iff the current user can read analytics.
    pub async fn can_view_analytics(&self) -> bool {
        self.has_permission("analytics", "read").await
    }

    async fn has_any_permission(&self, resource: &str, actions: &[&str]) -> bool {
        match self.current_session().await {
            Some(session) if session.user.is_active => actions
                .iter()
                .any(|action| rbac::permissions_allow(&session.user.permissions, resource, action)),
            _ => false,
        }
    }

    /// Check route access for the current user. False when Anonymous.
    pub async fn can_access_route(&self, route: &str) -> bool {
        match self.current_session().await {
            Some(session) => rbac::can_access_route(&session.user, route),
            None => false,
        }
    }

    /// Protected routes the current user may access. Empty when Anonymous.
    pub async fn accessible_routes(&self) -> Vec<String> {
        match self.current_session().await {
            Some(session) => rbac::accessible_routes(&session.user),
            None => Vec::new(),
        }
    }

    /// Install a freshly authenticated session, replacing any previous one.
    ///
    /// The old token is simply discarded; there is no registry to revoke
    /// it against. A store failure is logged and swallowed; the in-memory
    /// session stays authoritative for this process.
    async fn install(&self, session: AuthSession) -> AuthSession {
        let mut guard = self.session.write().await;
        *guard = Some(session.clone());

        let repo = SessionRepository::new(self.db.pool());
        if let Err(e) = repo.save(&session.user, &session.token).await {
            warn!(error = %e, "Failed to persist session, keeping in-memory session");
        }

        session
    }

    /// The current session, applying lazy expiry.
    async fn current_session(&self) -> Option<AuthSession> {
        {
            let guard = self.session.read().await;
            match &*guard {
                None => return None,
                Some(session) if session.is_valid() => return Some(session.clone()),
                Some(_) => {}
            }
        }

        // Observed an expired session: take the write lock and clear it.
        let mut guard = self.session.write().await;
        if let Some(session) = &*guard {
            if !session.is_valid() {
                info!(user_id = %session.user.id, "Session expired, clearing");
                *guard = None;

                let repo = SessionRepository::new(self.db.pool());
                if let Err(e) = repo.clear().await {
                    warn!(error = %e, "Failed to clear expired session from store");
                }
            }
        }

        guard.clone()
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager").finish()
    }
}
