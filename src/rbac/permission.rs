//! Role-based access control tables for lectern.
//!
//! The role→permission mapping is a static table, not a computed policy.
//! Users receive a snapshot of their role's defaults at account creation;
//! permission checks read that snapshot, so editing this table never
//! changes permissions already issued to existing accounts.

use serde::{Deserialize, Serialize};

use crate::db::Role;

/// A (resource, allowed actions) pair controlling access to a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Protected resource class (e.g. "articles", "users").
    pub resource: String,
    /// Allowed verbs on the resource (e.g. "read", "publish").
    pub actions: Vec<String>,
}

impl Permission {
    /// Build a permission entry.
    pub fn new(resource: &str, actions: &[&str]) -> Self {
        Self {
            resource: resource.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Check whether this entry allows `action` on `resource`.
    /// Exact string match on both sides; no wildcard or hierarchy semantics.
    pub fn allows(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.actions.iter().any(|a| a == action)
    }
}

/// Default permission set for a role.
///
/// Total over the role enum and deterministic. The Admin set carries the
/// `admin: access` entry alongside the resource rows, making this table
/// the single source of truth for admin access checks as well.
pub fn default_permissions(role: Role) -> Vec<Permission> {
    match role {
        Role::Admin => vec![
            Permission::new("users", &["create", "read", "update", "delete"]),
            Permission::new("articles", &["create", "read", "update", "delete", "publish"]),
            Permission::new("reviews", &["create", "read", "update", "delete", "assign"]),
            Permission::new("analytics", &["read"]),
            Permission::new("settings", &["read", "update"]),
            Permission::new("admin", &["access"]),
        ],
        Role::Professor => vec![
            Permission::new("articles", &["create", "read", "update", "publish"]),
            Permission::new("reviews", &["create", "read", "update"]),
            Permission::new("documents", &["create", "read", "update", "delete"]),
            Permission::new("analytics", &["read"]),
        ],
        Role::Reviewer => vec![
            Permission::new("articles", &["read"]),
            Permission::new("reviews", &["create", "read", "update"]),
        ],
        Role::Author => vec![
            Permission::new("articles", &["create", "read", "update"]),
            Permission::new("documents", &["create", "read", "update", "delete"]),
        ],
        Role::Member => vec![Permission::new("articles", &["read"])],
    }
}

/// Check whether a permission set allows `action` on `resource`.
///
/// Exact string match; an empty set allows nothing.
pub fn permissions_allow(permissions: &[Permission], resource: &str, action: &str) -> bool {
    permissions.iter().any(|p| p.allows(resource, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 5] = [
        Role::Admin,
        Role::Professor,
        Role::Reviewer,
        Role::Author,
        Role::Member,
    ];

    #[test]
    fn test_table_total_and_non_empty() {
        for role in ALL_ROLES {
            let perms = default_permissions(role);
            assert!(!perms.is_empty(), "role {role} has an empty default set");
        }
    }

    #[test]
    fn test_table_deterministic() {
        for role in ALL_ROLES {
            assert_eq!(default_permissions(role), default_permissions(role));
        }
    }

    #[test]
    fn test_admin_permissions() {
        let perms = default_permissions(Role::Admin);

        assert!(permissions_allow(&perms, "users", "delete"));
        assert!(permissions_allow(&perms, "articles", "publish"));
        assert!(permissions_allow(&perms, "reviews", "assign"));
        assert!(permissions_allow(&perms, "analytics", "read"));
        assert!(permissions_allow(&perms, "settings", "update"));
        assert!(permissions_allow(&perms, "admin", "access"));
        // Admin has no documents row
        assert!(!permissions_allow(&perms, "documents", "read"));
    }

    #[test]
    fn test_professor_permissions() {
        let perms = default_permissions(Role::Professor);

        assert!(permissions_allow(&perms, "articles", "publish"));
        assert!(permissions_allow(&perms, "reviews", "update"));
        assert!(permissions_allow(&perms, "documents", "delete"));
        assert!(permissions_allow(&perms, "analytics", "read"));
        assert!(!permissions_allow(&perms, "articles", "delete"));
        assert!(!permissions_allow(&perms, "users", "read"));
        assert!(!permissions_allow(&perms, "admin", "access"));
    }

    #[test]
    fn test_reviewer_permissions() {
        let perms = default_permissions(Role::Reviewer);

        assert!(permissions_allow(&perms, "articles", "read"));
        assert!(permissions_allow(&perms, "reviews", "create"));
        assert!(!permissions_allow(&perms, "articles", "create"));
        assert!(!permissions_allow(&perms, "reviews", "assign"));
    }

    #[test]
    fn test_author_permissions() {
        let perms = default_permissions(Role::Author);

        assert!(permissions_allow(&perms, "articles", "update"));
        assert!(permissions_allow(&perms, "documents", "create"));
        assert!(!permissions_allow(&perms, "articles", "publish"));
        assert!(!permissions_allow(&perms, "reviews", "read"));
    }

    #[test]
    fn test_member_permissions() {
        let perms = default_permissions(Role::Member);

        assert!(permissions_allow(&perms, "articles", "read"));
        assert!(!permissions_allow(&perms, "articles", "delete"));
        assert!(!permissions_allow(&perms, "articles", "create"));
    }

    #[test]
    fn test_unknown_resource_denied_for_every_role() {
        for role in ALL_ROLES {
            let perms = default_permissions(role);
            assert!(!permissions_allow(&perms, "nonexistent-resource", "read"));
        }
    }

    #[test]
    fn test_exact_match_no_substring() {
        let perms = vec![Permission::new("articles", &["read"])];
        assert!(!permissions_allow(&perms, "article", "read"));
        assert!(!permissions_allow(&perms, "articles", "rea"));
        assert!(!permissions_allow(&perms, "articles", "reads"));
        assert!(!permissions_allow(&perms, "Articles", "read"));
    }

    #[test]
    fn test_empty_set_allows_nothing() {
        assert!(!permissions_allow(&[], "articles", "read"));
    }

    #[test]
    fn test_permission_serde_round_trip() {
        let perm = Permission::new("reviews", &["create", "assign"]);
        let json = serde_json::to_string(&perm).unwrap();
        assert!(json.contains("\"resource\":\"reviews\""));
        let parsed: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, perm);
    }
}
