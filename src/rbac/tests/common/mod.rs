//! Shared helpers for the integration suites

#![allow(dead_code)]

use lms_rbac::{Permission, PermissionOverrides, Role, UserRecord};
use proptest::prelude::*;

/// Route decision logs to the test writer; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn user(role: Role) -> UserRecord {
    UserRecord::new(role)
}

pub fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

pub fn non_admin_role() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![Role::Student, Role::PartnerInstructor, Role::Instructor])
}

pub fn any_permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::ALL.to_vec())
}

pub fn any_overrides() -> impl Strategy<Value = PermissionOverrides> {
    prop::collection::vec((any_permission(), any::<bool>()), 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}
