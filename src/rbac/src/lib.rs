//! # LMS Role-Based Access Control
//!
//! Authorization engine behind the learning platform's admin, instructor,
//! partner-instructor and student dashboards.
//!
//! ## Features
//!
//! - **Compiled-in tables** for roles, permissions, role defaults and routes
//! - **Per-user overrides** that replace a role's default permissions
//! - **Route authorization** with ordered, first-match prefix rules
//! - **Role-transition and management rules** for admin workflows
//! - **Fail-closed**: a missing or unrecognized role denies everything
//!
//! Every decision is a pure function over a caller-supplied [`UserRecord`];
//! the crate performs no I/O and keeps no state.
//!
//! ## Example
//!
//! ```rust
//! use lms_rbac::{can_access_route, has_permission, Permission, Role, UserRecord};
//!
//! let user = UserRecord::from_json(r#"{ "id": "u-42", "role": "student" }"#).unwrap();
//!
//! assert!(has_permission(Some(&user), Permission::SubmitAssignments));
//! assert!(!has_permission(Some(&user), Permission::GradeAssignments));
//! assert!(can_access_route(Some(&user), "/courses/123"));
//! assert!(!can_access_route(Some(&user), "/admin/users"));
//! assert!(user.has_role(Role::Student));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod management;
pub mod registry;
pub mod resolver;
pub mod route;
pub mod transition;
pub mod user;

// Re-export commonly used types
pub use config::{RbacConfig, UnlistedRoutePolicy};
pub use engine::{AccessDecision, Authorizer, DecisionReason};
pub use error::{RbacError, Result};
pub use management::{can_manage_user, manageable_roles};
pub use registry::{
    default_permissions, default_permissions_for_tag, hierarchy_divergences, role_hierarchy,
    Audience, Permission, Role,
};
pub use resolver::{
    effective_permissions, has_all_permissions, has_any_permission, has_permission,
    has_permission_tag, has_role,
};
pub use route::{can_access_route, guard_navigation, matching_route, GuardOutcome, ROUTE_TABLE};
pub use transition::{
    is_valid_role_change, plan_role_change, validate_role_change, OverrideChange, RoleChange,
};
pub use user::{PermissionOverrides, UserRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
