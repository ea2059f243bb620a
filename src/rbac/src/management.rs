//! Management authorizer
//!
//! Decides whether an acting user may edit, suspend or delete a target user.
//!
//! A partner instructor passes for any student record. Whether that student
//! is actually assigned to the mentor lives in the mentor-assignment records,
//! which this crate never sees; callers that need the tighter rule must
//! enforce it in their data-access layer.

use crate::registry::Role;
use crate::user::UserRecord;

/// Whether `acting` may manage `target`. Rules are checked in order, first
/// match wins.
pub fn can_manage_user(acting: Option<&UserRecord>, target: Option<&UserRecord>) -> bool {
    let (Some(acting), Some(target)) = (acting, target) else {
        return false;
    };

    match acting.role {
        Some(Role::Admin) => true,
        Some(Role::Instructor) => matches!(
            target.role,
            Some(Role::PartnerInstructor) | Some(Role::Student)
        ),
        Some(Role::PartnerInstructor) => target.role == Some(Role::Student),
        _ => false,
    }
}

/// Target roles `role` may manage, highest first
pub fn manageable_roles(role: Role) -> &'static [Role] {
    match role {
        Role::Admin => &[
            Role::Admin,
            Role::Instructor,
            Role::PartnerInstructor,
            Role::Student,
        ],
        Role::Instructor => &[Role::PartnerInstructor, Role::Student],
        Role::PartnerInstructor => &[Role::Student],
        Role::Student => &[],
    }
}

impl UserRecord {
    /// See [`can_manage_user`]
    pub fn can_manage(&self, target: &UserRecord) -> bool {
        can_manage_user(Some(self), Some(target))
    }
}
