//! Database schema migrations for lectern.
//!
//! Each entry is one migration batch; `Database::migrate` applies them in
//! order and records progress in the `schema_version` table. Never edit a
//! shipped migration; append a new one.

/// Ordered migration batches.
pub const MIGRATIONS: &[&str] = &[
    // v1: user collection and the two-slot session store
    r#"
    CREATE TABLE users (
        id         TEXT PRIMARY KEY,
        email      TEXT NOT NULL UNIQUE COLLATE NOCASE,
        role       TEXT NOT NULL,
        is_active  INTEGER NOT NULL DEFAULT 1,
        doc        TEXT NOT NULL
    );

    CREATE INDEX idx_users_role ON users(role);

    CREATE TABLE session (
        slot  TEXT PRIMARY KEY CHECK (slot IN ('current_user', 'auth_token')),
        value TEXT NOT NULL
    );
    "#,
];
