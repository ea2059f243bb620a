//! Role/Permission registry
//!
//! The single source of truth for valid roles, valid permissions and each
//! role's default permission set. All tables are compiled-in constants.

pub mod defaults;
pub mod permission;
pub mod role;

pub use defaults::{
    default_permission_list, default_permissions, default_permissions_for_tag,
    hierarchy_divergences, role_grants_by_default, HierarchyDivergence,
};
pub use permission::{permissions_for_audience, Audience, Permission};
pub use role::{role_hierarchy, Role};
