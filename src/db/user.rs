//! User model for lectern.
//!
//! This module defines the User struct and Role enum for account and
//! permission management. User records are persisted as JSON documents,
//! so every type here carries serde derives matching the stored layout.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rbac::{default_permissions, Permission};

/// User role for permission management.
///
/// Roles form a closed set; each maps to a default permission set via
/// [`default_permissions`]. Roles are categories, not levels; there is
/// no ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Professor (publishes and reviews).
    Professor,
    /// Peer reviewer.
    Reviewer,
    /// Article author.
    Author,
    /// Regular member (read-only).
    #[default]
    Member,
}

impl Role {
    /// Convert role to its stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Professor => "professor",
            Role::Reviewer => "reviewer",
            Role::Author => "author",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "professor" => Ok(Role::Professor),
            "reviewer" => Ok(Role::Reviewer),
            "author" => Ok(Role::Author),
            "member" => Ok(Role::Member),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A referenced publication on a user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Opaque identifier.
    pub id: String,
    /// Publication title.
    pub title: String,
    /// Journal name.
    pub journal: String,
    /// Publication year.
    pub year: i32,
    /// DOI, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// External URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A social/profile link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    /// Platform name (e.g. "linkedin").
    pub platform: String,
    /// Link URL.
    pub url: String,
}

/// Profile metadata attached to a user. Opaque to the auth core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Short biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Home institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Department within the institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Research interest tags.
    #[serde(default)]
    pub research_interests: Vec<String>,
    /// Listed publications.
    #[serde(default)]
    pub publications: Vec<Publication>,
    /// Social links.
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// Activity metrics attached to a user. Opaque to the auth core;
/// zero-initialized at account creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKpi {
    /// Number of articles published.
    pub articles_published: u32,
    /// Number of articles reviewed.
    pub articles_reviewed: u32,
    /// Average review score.
    pub review_score: f64,
    /// Average response time.
    pub response_time: f64,
    /// Collaboration score.
    pub collaboration_score: f64,
    /// When the metrics were last recomputed.
    pub last_updated: DateTime<Utc>,
}

impl UserKpi {
    /// Zeroed metrics, stamped now.
    pub fn zeroed() -> Self {
        Self {
            articles_published: 0,
            articles_reviewed: 0,
            review_score: 0.0,
            response_time: 0.0,
            collaboration_score: 0.0,
            last_updated: Utc::now(),
        }
    }
}

/// User entity representing a platform account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique identifier.
    pub id: String,
    /// Email address (unique, lookup key for some providers).
    pub email: String,
    /// Display name.
    pub name: String,
    /// User role.
    pub role: Role,
    /// Permission snapshot taken from the role's defaults at creation.
    /// The record, not the role table, is authoritative afterward.
    pub permissions: Vec<Permission>,
    /// Profile metadata.
    #[serde(default)]
    pub profile: UserProfile,
    /// Activity metrics.
    pub kpis: UserKpi,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last successful sign-in timestamp.
    pub last_login: DateTime<Utc>,
    /// Whether the account is active. Deactivated accounts cannot sign in.
    pub is_active: bool,
}

impl User {
    /// Create a new account with the standard creation rule: fresh opaque
    /// id, `created_at == last_login == now`, permission snapshot from the
    /// role's defaults, zeroed KPIs, active.
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            role,
            permissions: default_permissions(role),
            profile: UserProfile::default(),
            kpis: UserKpi::zeroed(),
            created_at: now,
            last_login: now,
            is_active: true,
        }
    }

    /// Set the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.profile.avatar = Some(avatar.into());
        self
    }

    /// Set the research interests.
    pub fn with_research_interests(mut self, interests: Vec<String>) -> Self {
        self.profile.research_interests = interests;
        self
    }

    /// Check if this user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Check if this user is a platform administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
