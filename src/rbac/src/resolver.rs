//! Permission resolver
//!
//! Resolution order for `has_permission`:
//!
//! 1. No user or no recognized role → deny
//! 2. Admin → allow, overrides are ignored
//! 3. Override map present → allow iff the map sets the permission to `true`
//!    (the map replaces the role defaults, it does not merge with them)
//! 4. Otherwise → allow iff the permission is in the role's default set

use crate::registry::{role_grants_by_default, Permission, Role};
use crate::user::UserRecord;

/// Whether the user holds exactly `role`. No hierarchy is applied.
pub fn has_role(user: Option<&UserRecord>, role: Role) -> bool {
    user.and_then(|u| u.role) == Some(role)
}

/// Whether the user holds `permission`
pub fn has_permission(user: Option<&UserRecord>, permission: Permission) -> bool {
    let Some(user) = user else {
        return false;
    };
    let Some(role) = user.role else {
        return false;
    };

    if role == Role::Admin {
        return true;
    }

    match &user.permission_overrides {
        Some(overrides) => overrides.grants(permission),
        None => role_grants_by_default(role, permission),
    }
}

/// Whether the user holds a permission given as a raw tag.
/// Unrecognized tags resolve to `false`.
pub fn has_permission_tag(user: Option<&UserRecord>, tag: &str) -> bool {
    Permission::parse(tag).is_some_and(|permission| has_permission(user, permission))
}

/// Whether the user holds at least one of `permissions`. Empty input denies.
pub fn has_any_permission(user: Option<&UserRecord>, permissions: &[Permission]) -> bool {
    permissions.iter().any(|&p| has_permission(user, p))
}

/// Whether the user holds every one of `permissions`. Empty input allows.
pub fn has_all_permissions(user: Option<&UserRecord>, permissions: &[Permission]) -> bool {
    permissions.iter().all(|&p| has_permission(user, p))
}

/// Every permission the user currently holds, in declaration order
pub fn effective_permissions(user: Option<&UserRecord>) -> Vec<Permission> {
    Permission::ALL
        .iter()
        .copied()
        .filter(|&p| has_permission(user, p))
        .collect()
}

impl UserRecord {
    /// See [`has_role`]
    pub fn has_role(&self, role: Role) -> bool {
        has_role(Some(self), role)
    }

    /// See [`has_permission`]
    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(Some(self), permission)
    }

    /// See [`has_any_permission`]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        has_any_permission(Some(self), permissions)
    }

    /// See [`has_all_permissions`]
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        has_all_permissions(Some(self), permissions)
    }
}
