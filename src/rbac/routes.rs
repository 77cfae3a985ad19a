//! Route access table for lectern.
//!
//! Maps UI routes to the permission required to enter them. The table is
//! the extension point a host router consumes; routes not listed here are
//! public. Checks read the user's permission snapshot, never the live
//! role table.

use crate::db::User;
use crate::rbac::permissions_allow;

/// Protected routes and the (resource, action) each requires.
const ROUTE_REQUIREMENTS: &[(&str, (&str, &str))] = &[
    ("/admin", ("admin", "access")),
    ("/articles/submit", ("articles", "create")),
    ("/articles/edit", ("articles", "update")),
    ("/reviews", ("reviews", "read")),
    ("/documents", ("documents", "read")),
    ("/analytics", ("analytics", "read")),
];

/// Look up the permission required for a route.
///
/// Returns `None` for routes not in the table (public routes).
pub fn route_requirement(route: &str) -> Option<(&'static str, &'static str)> {
    ROUTE_REQUIREMENTS
        .iter()
        .find(|(r, _)| *r == route)
        .map(|(_, req)| *req)
}

/// Check whether a user may access a route.
///
/// Unlisted routes are public. Deactivated accounts are denied everywhere.
pub fn can_access_route(user: &User, route: &str) -> bool {
    if !user.is_active {
        return false;
    }
    match route_requirement(route) {
        Some((resource, action)) => permissions_allow(&user.permissions, resource, action),
        None => true,
    }
}

/// List the protected routes a user may access.
///
/// Public routes are not enumerated; this filters the protected-route
/// table only.
pub fn accessible_routes(user: &User) -> Vec<String> {
    ROUTE_REQUIREMENTS
        .iter()
        .filter(|(route, _)| can_access_route(user, route))
        .map(|(route, _)| route.to_string())
        .collect()
}
