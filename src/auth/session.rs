//! Authentication session and failure types for lectern.

use thiserror::Error;

use super::token::AuthToken;
use crate::db::User;
use crate::LecternError;

/// Authentication failures.
///
/// Every expected failure mode is a variant whose `Display` string is the
/// message a caller renders; providers never panic on bad input. Internal
/// errors (storage, hashing) collapse into [`AuthError::Internal`] with a
/// deliberately generic message; details go to the log, not the user.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong email or password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Wrong admin username or password.
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,

    /// The account exists but has been deactivated.
    #[error("Account is deactivated")]
    AccountInactive,

    /// The identity provider rejected the token, was unreachable, or
    /// returned an unusable response.
    #[error("Failed to verify Google token")]
    TokenVerification,

    /// The identity provider's account has no verified email address.
    #[error("Google account email is missing or unverified")]
    UnverifiedEmail,

    /// Unexpected internal failure.
    #[error("Authentication failed")]
    Internal(#[source] LecternError),
}

impl From<LecternError> for AuthError {
    fn from(e: LecternError) -> Self {
        AuthError::Internal(e)
    }
}

/// The runtime pairing of an authenticated user with a token.
///
/// At most one session exists per manager; it is valid while the token is
/// unexpired.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    /// The signed-in user.
    pub user: User,
    /// The issued token.
    pub token: AuthToken,
}

impl AuthSession {
    /// Create a session from a provider result.
    pub fn new(user: User, token: AuthToken) -> Self {
        Self { user, token }
    }

    /// Check if the session is still valid (token unexpired).
    pub fn is_valid(&self) -> bool {
        !self.token.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Role;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            AuthError::InvalidAdminCredentials.to_string(),
            "Invalid admin credentials"
        );
        assert_eq!(
            AuthError::AccountInactive.to_string(),
            "Account is deactivated"
        );
        assert_eq!(
            AuthError::TokenVerification.to_string(),
            "Failed to verify Google token"
        );
        assert_eq!(
            AuthError::UnverifiedEmail.to_string(),
            "Google account email is missing or unverified"
        );
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        let err = AuthError::Internal(LecternError::Database("table dropped".to_string()));
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[test]
    fn test_session_validity() {
        let user = User::new("a@example.com", "A", Role::Member);

        let live = AuthSession::new(user.clone(), AuthToken::issue(Duration::from_secs(60)));
        assert!(live.is_valid());

        let expired = AuthSession::new(
            user,
            AuthToken {
                access_token: "t".to_string(),
                refresh_token: None,
                expires_at: Utc::now().timestamp_millis() - 1,
            },
        );
        assert!(!expired.is_valid());
    }
}
