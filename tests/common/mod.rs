//! Test helpers for lectern integration tests.
#![allow(dead_code)]

use std::path::Path;

use lectern::{AuthConfig, AuthManager, Database};

/// Bootstrap demo email account (config default).
pub const DEMO_EMAIL: &str = "test@example.com";
/// Bootstrap demo password (config default).
pub const DEMO_PASSWORD: &str = "password";
/// Bootstrap admin username (config default).
pub const ADMIN_USERNAME: &str = "admin";
/// Bootstrap admin password (config default).
pub const ADMIN_PASSWORD: &str = "B1950";

/// Auth config with default bootstrap credentials.
pub fn test_config() -> AuthConfig {
    AuthConfig::default()
}

/// Auth config with short session lifetimes for expiry tests.
pub fn short_session_config(secs: u64) -> AuthConfig {
    AuthConfig {
        session_secs: secs,
        admin_session_secs: secs,
        ..AuthConfig::default()
    }
}

/// In-memory database plus a manager over it.
pub async fn memory_manager() -> (Database, AuthManager) {
    memory_manager_with(test_config()).await
}

/// In-memory database plus a manager with a custom auth config.
pub async fn memory_manager_with(config: AuthConfig) -> (Database, AuthManager) {
    let db = Database::open_in_memory().await.unwrap();
    let manager = AuthManager::new(db.clone(), &config).await.unwrap();
    (db, manager)
}

/// File-backed database plus a manager, for restart tests.
pub async fn file_manager(path: &Path) -> (Database, AuthManager) {
    let db = Database::open(path).await.unwrap();
    let manager = AuthManager::new(db.clone(), &test_config()).await.unwrap();
    (db, manager)
}
