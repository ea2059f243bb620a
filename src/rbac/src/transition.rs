//! Role-transition validator
//!
//! Expresses policy only. The caller must already have checked that whoever
//! requests the change is an admin, and is responsible for persisting the
//! result of [`plan_role_change`].

use crate::error::{RbacError, Result};
use crate::registry::{default_permission_list, Role};
use crate::user::{PermissionOverrides, UserRecord};
use tracing::debug;

/// Check a role change between two known roles, naming the rule that
/// rejects it.
///
/// Admin can neither be granted nor removed here; both go through a
/// separate privileged flow. Every other pair, including a no-op change,
/// is allowed.
pub fn validate_role_change(from: Role, to: Role) -> Result<()> {
    if to == Role::Admin {
        return Err(RbacError::AdminElevation { from });
    }
    if from == Role::Admin {
        return Err(RbacError::AdminDemotion { to });
    }
    Ok(())
}

/// Whether a change between two raw role tags is administratively permitted.
/// Unknown tags are rejected.
pub fn is_valid_role_change(from: &str, to: &str) -> bool {
    match (Role::parse(from), Role::parse(to)) {
        (Some(from), Some(to)) => validate_role_change(from, to).is_ok(),
        _ => false,
    }
}

/// What happens to a user's override map on a role change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideChange {
    /// Leave the map as it is
    Keep,
    /// Remove the map, the new role's defaults apply
    Clear,
    /// Install this map
    Replace(PermissionOverrides),
}

/// A validated role change and the side effects to persist with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    pub from: Role,
    pub to: Role,
    pub overrides: OverrideChange,
}

impl RoleChange {
    /// Apply the change to a copy of `user`
    pub fn apply(&self, user: &UserRecord) -> UserRecord {
        let mut updated = user.clone();
        updated.role = Some(self.to);
        match &self.overrides {
            OverrideChange::Keep => {}
            OverrideChange::Clear => updated.permission_overrides = None,
            OverrideChange::Replace(map) => updated.permission_overrides = Some(map.clone()),
        }
        updated
    }
}

/// Override map a user receives on becoming a partner instructor
pub fn partner_instructor_overrides() -> PermissionOverrides {
    default_permission_list(Role::PartnerInstructor)
        .iter()
        .map(|&permission| (permission, true))
        .collect()
}

/// Validate moving `user` to `to` and work out the override side effects.
///
/// Leaving partner instructor clears the override map; entering it seeds a
/// map with every partner instructor default granted.
pub fn plan_role_change(user: &UserRecord, to: Role) -> Result<RoleChange> {
    let from = user.role.ok_or(RbacError::MissingRole)?;
    validate_role_change(from, to)?;

    let overrides = match (from, to) {
        (Role::PartnerInstructor, Role::PartnerInstructor) => OverrideChange::Keep,
        (Role::PartnerInstructor, _) => OverrideChange::Clear,
        (_, Role::PartnerInstructor) => OverrideChange::Replace(partner_instructor_overrides()),
        _ => OverrideChange::Keep,
    };

    debug!("Planned role change {} -> {}: {:?}", from, to, overrides);

    Ok(RoleChange {
        from,
        to,
        overrides,
    })
}
