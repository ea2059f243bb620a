//! Authorization decisions with the rule that produced them

use crate::config::UnlistedRoutePolicy;
use crate::registry::{Permission, Role};
use serde::{Deserialize, Serialize};

/// Authorization decision with its reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the request is allowed
    pub allowed: bool,

    /// Rule that decided
    pub reason: DecisionReason,
}

impl AccessDecision {
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    pub fn new(allowed: bool, reason: DecisionReason) -> Self {
        Self { allowed, reason }
    }
}

/// Reason for an authorization decision
///
/// Callers should not branch on the difference between a missing identity
/// and a legitimate denial; both mean "deny". The reason is for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionReason {
    /// No user record was supplied
    MissingUser,

    /// The record has no recognized role
    MissingRole,

    /// Admins hold every permission
    AdminBypass,

    /// The override map decided
    Override { permission: Permission },

    /// The role's default set decided
    RoleDefault { role: Role, permission: Permission },

    /// A route table entry decided
    RouteRule { prefix: String, role: Role },

    /// No route table entry matched
    UnlistedRoute { policy: UnlistedRoutePolicy },

    /// The management rules decided
    Management { actor: Role, target: Option<Role> },

    /// The role-transition rules decided
    RoleChange { from: String, to: String, detail: Option<String> },
}
