//! Credential verification for lectern.
//!
//! Providers verify sign-in secrets through the [`CredentialVerifier`]
//! trait rather than comparing constants. The bundled implementation holds
//! Argon2 hashes in memory; a deployment backs the trait with its real
//! credential store and injects it at composition time.

use std::collections::HashMap;

use tracing::debug;

use super::password::{hash_password, verify_password, PasswordError};

/// Verifies a (identifier, password) pair.
///
/// An unknown identifier and a wrong password are indistinguishable to the
/// caller; both are just `false`.
pub trait CredentialVerifier: Send + Sync {
    /// Check a password for an identifier (email or username).
    fn verify(&self, identifier: &str, password: &str) -> bool;
}

/// In-memory credential set holding Argon2 hashes.
///
/// Identifiers are matched case-insensitively, matching the user
/// collection's email lookup.
#[derive(Default)]
pub struct StaticCredentials {
    hashes: HashMap<String, String>,
}

impl StaticCredentials {
    /// Create an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash and add a credential pair.
    pub fn add(&mut self, identifier: &str, password: &str) -> Result<(), PasswordError> {
        let hash = hash_password(password)?;
        self.hashes.insert(identifier.to_lowercase(), hash);
        Ok(())
    }

    /// Add a credential pair, consuming and returning self.
    pub fn with(mut self, identifier: &str, password: &str) -> Result<Self, PasswordError> {
        self.add(identifier, password)?;
        Ok(self)
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, identifier: &str, password: &str) -> bool {
        match self.hashes.get(&identifier.to_lowercase()) {
            Some(hash) => verify_password(password, hash).is_ok(),
            None => {
                debug!(identifier = %identifier, "Unknown credential identifier");
                false
            }
        }
    }
}
