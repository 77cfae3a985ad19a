//! lectern - Session and role-based access core for a scholarly publishing
//! platform.
//!
//! Provides the user/role data model, a durable session store, three
//! pluggable sign-in providers, and the [`AuthManager`] service that owns
//! the current session and answers permission queries.
//!
//! Everything here runs inside the consuming process; tokens are opaque
//! and never server-verified. Treat the permission model as a UI
//! convenience cache, not a security boundary.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod rbac;

pub use auth::{
    hash_password, verify_password, AdminProvider, AuthError, AuthManager, AuthSession, AuthToken,
    CredentialVerifier, EmailProvider, GoogleProvider, PasswordError, StaticCredentials,
    ADMIN_SESSION_DURATION_SECS, DEFAULT_SESSION_DURATION_SECS,
};
pub use config::{AuthConfig, Config, DatabaseConfig, LoggingConfig};
pub use db::{
    Database, DbPool, Publication, Role, SessionRepository, SocialLink, User, UserKpi,
    UserProfile, UserRepository,
};
pub use error::{LecternError, Result};
pub use rbac::{
    accessible_routes, can_access_route, default_permissions, permissions_allow,
    route_requirement, Permission,
};
