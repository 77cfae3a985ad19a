//! E2E authentication tests for lectern.
//!
//! Exercises the sign-in, sign-out, and expiry flows through the
//! `AuthManager`, the way a host UI would.

mod common;

use std::time::Duration;

use common::{
    memory_manager, memory_manager_with, short_session_config, ADMIN_PASSWORD, ADMIN_USERNAME,
    DEMO_EMAIL, DEMO_PASSWORD,
};
use lectern::{AuthError, Role, UserRepository};

/// First admin sign-in creates the unique admin account.
#[tokio::test]
async fn test_admin_first_sign_in_creates_account() {
    let (db, manager) = memory_manager().await;

    let repo = UserRepository::new(db.pool());
    assert_eq!(repo.count().await.unwrap(), 0);

    let session = manager
        .sign_in_as_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    assert_eq!(session.user.role, Role::Admin);
    assert_eq!(repo.count_by_role(Role::Admin).await.unwrap(), 1);
    assert!(manager.is_authenticated().await);
    assert!(manager.is_admin().await);
}

/// Second admin sign-in reuses the account and stamps last_login.
#[tokio::test]
async fn test_admin_second_sign_in_reuses_account() {
    let (db, manager) = memory_manager().await;

    let first = manager
        .sign_in_as_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;

    let second = manager
        .sign_in_as_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    assert_eq!(first.user.id, second.user.id);
    assert!(second.user.last_login > first.user.last_login);

    let repo = UserRepository::new(db.pool());
    assert_eq!(repo.count_by_role(Role::Admin).await.unwrap(), 1);
}

/// Wrong admin password: expected failure, no account, no session.
#[tokio::test]
async fn test_admin_wrong_password() {
    let (db, manager) = memory_manager().await;

    let err = manager
        .sign_in_as_admin(ADMIN_USERNAME, "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidAdminCredentials));
    assert_eq!(err.to_string(), "Invalid admin credentials");
    assert!(!manager.is_authenticated().await);

    let repo = UserRepository::new(db.pool());
    assert_eq!(repo.count().await.unwrap(), 0);
}

/// Demo email sign-in yields a Member session.
#[tokio::test]
async fn test_email_sign_in() {
    let (_db, manager) = memory_manager().await;

    let session = manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    assert_eq!(session.user.role, Role::Member);
    assert!(manager.is_member().await);
    assert!(!manager.is_admin().await);
    assert!(!manager.is_professor().await);
    assert!(!manager.is_reviewer().await);
    assert!(!manager.is_author().await);
}

/// Any other password fails the email sign-in.
#[tokio::test]
async fn test_email_wrong_password() {
    let (_db, manager) = memory_manager().await;

    let err = manager
        .sign_in_with_email(DEMO_EMAIL, "not-the-password")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!manager.is_authenticated().await);
}

/// N sign-ins produce N pairwise-distinct access tokens.
#[tokio::test]
async fn test_token_uniqueness_across_sign_ins() {
    let (_db, manager) = memory_manager().await;

    let mut tokens = std::collections::HashSet::new();
    for _ in 0..5 {
        let session = manager
            .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .unwrap();
        assert!(
            tokens.insert(session.token.access_token),
            "access token reused across issuances"
        );
    }
}

/// Repeated sign-in while authenticated overwrites the session.
#[tokio::test]
async fn test_repeated_sign_in_overwrites() {
    let (_db, manager) = memory_manager().await;

    manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    assert!(manager.is_member().await);

    manager
        .sign_in_as_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    // The member session is gone, replaced wholesale
    assert!(manager.is_admin().await);
    assert!(!manager.is_member().await);
}

/// Sign-out returns to Anonymous and is idempotent.
#[tokio::test]
async fn test_sign_out_idempotent() {
    let (_db, manager) = memory_manager().await;

    manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    manager.sign_out().await;
    assert!(!manager.is_authenticated().await);

    // Already Anonymous: still fine
    manager.sign_out().await;
    manager.sign_out().await;
    assert!(!manager.is_authenticated().await);
}

/// Admin sessions are shorter-lived than email sessions.
#[tokio::test]
async fn test_provider_specific_lifetimes() {
    let (_db, manager) = memory_manager().await;

    let admin = manager
        .sign_in_as_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();
    let email = manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let admin_remaining = admin.token.remaining().unwrap().as_secs();
    let email_remaining = email.token.remaining().unwrap().as_secs();

    assert!(admin_remaining <= 8 * 60 * 60);
    assert!(admin_remaining > 8 * 60 * 60 - 60);
    assert!(email_remaining <= 24 * 60 * 60);
    assert!(email_remaining > 24 * 60 * 60 - 60);
}

/// A session expires in place: queries flip to their safe defaults.
#[tokio::test]
async fn test_live_expiry_flips_queries() {
    let (_db, manager) = memory_manager_with(short_session_config(1)).await;

    manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    assert!(manager.is_authenticated().await);
    assert!(manager.has_permission("articles", "read").await);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert!(!manager.is_authenticated().await);
    assert!(!manager.has_permission("articles", "read").await);
    assert!(!manager.is_member().await);
    assert!(manager.current_user().await.is_none());
    assert!(manager.current_token().await.is_none());
}

/// Deactivating the account blocks the next sign-in.
#[tokio::test]
async fn test_deactivated_account_blocked_at_sign_in() {
    let (db, manager) = memory_manager().await;

    let session = manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    manager.sign_out().await;

    let repo = UserRepository::new(db.pool());
    repo.set_active(&session.user.id, false).await.unwrap();

    let err = manager
        .sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountInactive));
    assert!(!manager.is_authenticated().await);
}
