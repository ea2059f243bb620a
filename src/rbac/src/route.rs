//! Route authorizer
//!
//! Maps a requested path to the roles allowed to view it. The table is
//! scanned in order and the first prefix the path starts with wins, so the
//! order of [`ROUTE_TABLE`] is part of the contract. Paths no entry matches
//! are open to any user with a recognized role.

use crate::config::UnlistedRoutePolicy;
use crate::registry::Role;
use crate::user::UserRecord;

/// A path prefix and the roles allowed under it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub allowed_roles: &'static [Role],
}

impl RouteRule {
    /// Plain string prefix match (`/administration` matches `/admin`)
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prefix)
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

const EVERYONE: &[Role] = &[
    Role::Admin,
    Role::Instructor,
    Role::PartnerInstructor,
    Role::Student,
];

/// Protected route prefixes, in scan order
pub const ROUTE_TABLE: &[RouteRule] = &[
    RouteRule {
        prefix: "/admin",
        allowed_roles: &[Role::Admin],
    },
    RouteRule {
        prefix: "/instructor",
        allowed_roles: &[Role::Instructor, Role::Admin],
    },
    RouteRule {
        prefix: "/partner-instructor",
        allowed_roles: &[Role::PartnerInstructor, Role::Admin],
    },
    RouteRule {
        prefix: "/student",
        allowed_roles: &[Role::Student, Role::Admin],
    },
    RouteRule {
        prefix: "/dashboard",
        allowed_roles: EVERYONE,
    },
    RouteRule {
        prefix: "/courses",
        allowed_roles: EVERYONE,
    },
    RouteRule {
        prefix: "/analytics",
        allowed_roles: &[Role::Instructor, Role::Admin],
    },
    RouteRule {
        prefix: "/settings",
        allowed_roles: EVERYONE,
    },
];

/// First rule whose prefix `path` starts with
pub fn matching_route(path: &str) -> Option<&'static RouteRule> {
    ROUTE_TABLE.iter().find(|rule| rule.matches(path))
}

/// Whether the user may view `path`
pub fn can_access_route(user: Option<&UserRecord>, path: &str) -> bool {
    can_access_route_with(user, path, UnlistedRoutePolicy::Allow)
}

/// [`can_access_route`] with an explicit policy for paths outside the table
pub fn can_access_route_with(
    user: Option<&UserRecord>,
    path: &str,
    unlisted: UnlistedRoutePolicy,
) -> bool {
    let Some(role) = user.and_then(|u| u.role) else {
        return false;
    };

    match matching_route(path) {
        Some(rule) => rule.allows(role),
        None => unlisted == UnlistedRoutePolicy::Allow,
    }
}

/// What a navigation guard should do with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested page
    Render,
    /// No usable identity, send to sign-in
    RedirectToLogin,
    /// Signed in but not allowed here, send to the role's dashboard
    RedirectToHome(&'static str),
}

/// Decide how a navigation guard handles `path`
pub fn guard_navigation(user: Option<&UserRecord>, path: &str) -> GuardOutcome {
    guard_navigation_with(user, path, UnlistedRoutePolicy::Allow)
}

pub fn guard_navigation_with(
    user: Option<&UserRecord>,
    path: &str,
    unlisted: UnlistedRoutePolicy,
) -> GuardOutcome {
    let Some(role) = user.and_then(|u| u.role) else {
        return GuardOutcome::RedirectToLogin;
    };

    if can_access_route_with(user, path, unlisted) {
        GuardOutcome::Render
    } else {
        GuardOutcome::RedirectToHome(role.dashboard_path())
    }
}
