//! Authorizer facade
//!
//! Wraps the pure decision functions with configuration, structured logging
//! and decision reasons. Each call recomputes from the record it is given;
//! nothing is cached and no state is shared between calls.

pub mod decision;

pub use decision::{AccessDecision, DecisionReason};

use crate::config::RbacConfig;
use crate::error::Result;
use crate::management;
use crate::registry::{role_grants_by_default, Permission, Role};
use crate::route::{self, GuardOutcome};
use crate::transition::{self, RoleChange};
use crate::user::UserRecord;

use tracing::{debug, warn};

/// Authorization facade used by navigation guards, page actions and admin
/// workflows
///
/// ```text
/// UserRecord ─┬─ has_permission ──→ override map / role defaults
///             ├─ can_access_route → route table (first prefix wins)
///             ├─ can_manage_user ─→ management rules
///             └─ plan_role_change → transition rules + override effects
/// ```
#[derive(Debug, Clone, Default)]
pub struct Authorizer {
    config: RbacConfig,
}

impl Authorizer {
    /// Create an authorizer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an authorizer with the given configuration
    pub fn with_config(config: RbacConfig) -> Self {
        debug!(
            "Authorizer initialized with unlisted_routes={:?}, trace_decisions={}",
            config.unlisted_routes, config.trace_decisions
        );
        Self { config }
    }

    /// Create an authorizer configured from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(RbacConfig::from_env()?))
    }

    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    /// Decide a permission check and say why
    pub fn explain_permission(
        &self,
        user: Option<&UserRecord>,
        permission: Permission,
    ) -> AccessDecision {
        let decision = match self.identity(user) {
            Err(reason) => AccessDecision::deny(reason),
            Ok((_, Role::Admin)) => AccessDecision::allow(DecisionReason::AdminBypass),
            Ok((user, role)) => match &user.permission_overrides {
                Some(overrides) => AccessDecision::new(
                    overrides.grants(permission),
                    DecisionReason::Override { permission },
                ),
                None => AccessDecision::new(
                    role_grants_by_default(role, permission),
                    DecisionReason::RoleDefault { role, permission },
                ),
            },
        };

        if self.config.trace_decisions {
            debug!(
                permission = %permission,
                allowed = decision.allowed,
                reason = ?decision.reason,
                "Permission decision"
            );
        }

        decision
    }

    pub fn has_permission(&self, user: Option<&UserRecord>, permission: Permission) -> bool {
        self.explain_permission(user, permission).allowed
    }

    pub fn has_role(&self, user: Option<&UserRecord>, role: Role) -> bool {
        crate::resolver::has_role(user, role)
    }

    /// True if any permission is held; empty input denies
    pub fn has_any_permission(
        &self,
        user: Option<&UserRecord>,
        permissions: &[Permission],
    ) -> bool {
        permissions.iter().any(|&p| self.has_permission(user, p))
    }

    /// True if every permission is held; empty input allows
    pub fn has_all_permissions(
        &self,
        user: Option<&UserRecord>,
        permissions: &[Permission],
    ) -> bool {
        permissions.iter().all(|&p| self.has_permission(user, p))
    }

    /// Decide a route check and say why
    pub fn explain_route(&self, user: Option<&UserRecord>, path: &str) -> AccessDecision {
        let decision = match self.identity(user) {
            Err(reason) => AccessDecision::deny(reason),
            Ok((_, role)) => match route::matching_route(path) {
                Some(rule) => AccessDecision::new(
                    rule.allows(role),
                    DecisionReason::RouteRule {
                        prefix: rule.prefix.to_string(),
                        role,
                    },
                ),
                None => AccessDecision::new(
                    route::can_access_route_with(user, path, self.config.unlisted_routes),
                    DecisionReason::UnlistedRoute {
                        policy: self.config.unlisted_routes,
                    },
                ),
            },
        };

        if self.config.trace_decisions {
            debug!(
                path,
                allowed = decision.allowed,
                reason = ?decision.reason,
                "Route decision"
            );
        }

        decision
    }

    pub fn can_access_route(&self, user: Option<&UserRecord>, path: &str) -> bool {
        self.explain_route(user, path).allowed
    }

    /// Navigation guard outcome under this authorizer's configuration
    pub fn guard_navigation(&self, user: Option<&UserRecord>, path: &str) -> GuardOutcome {
        let outcome = route::guard_navigation_with(user, path, self.config.unlisted_routes);
        if self.config.trace_decisions {
            debug!(path, outcome = ?outcome, "Navigation guard");
        }
        outcome
    }

    /// Decide a management check and say why
    pub fn explain_management(
        &self,
        acting: Option<&UserRecord>,
        target: Option<&UserRecord>,
    ) -> AccessDecision {
        let decision = match (self.identity(acting), target) {
            (Err(reason), _) => AccessDecision::deny(reason),
            (Ok(_), None) => AccessDecision::deny(DecisionReason::MissingUser),
            (Ok((_, actor)), Some(target_user)) => AccessDecision::new(
                management::can_manage_user(acting, target),
                DecisionReason::Management {
                    actor,
                    target: target_user.role,
                },
            ),
        };

        if self.config.trace_decisions {
            debug!(
                allowed = decision.allowed,
                reason = ?decision.reason,
                "Management decision"
            );
        }

        decision
    }

    pub fn can_manage_user(
        &self,
        acting: Option<&UserRecord>,
        target: Option<&UserRecord>,
    ) -> bool {
        self.explain_management(acting, target).allowed
    }

    /// Decide a role change between raw tags and say why
    pub fn explain_role_change(&self, from: &str, to: &str) -> AccessDecision {
        let detail = match (from.parse::<Role>(), to.parse::<Role>()) {
            (Ok(from), Ok(to)) => transition::validate_role_change(from, to)
                .err()
                .map(|e| e.to_string()),
            (Err(e), _) | (_, Err(e)) => Some(e.to_string()),
        };

        let decision = AccessDecision::new(
            detail.is_none(),
            DecisionReason::RoleChange {
                from: from.to_string(),
                to: to.to_string(),
                detail,
            },
        );

        if self.config.trace_decisions {
            debug!(from, to, allowed = decision.allowed, "Role change decision");
        }

        decision
    }

    pub fn is_valid_role_change(&self, from: &str, to: &str) -> bool {
        self.explain_role_change(from, to).allowed
    }

    /// Validate a role change for `user` and compute its side effects
    pub fn plan_role_change(&self, user: &UserRecord, to: Role) -> Result<RoleChange> {
        transition::plan_role_change(user, to).map_err(|e| {
            warn!("Rejected role change to {}: {}", to, e);
            e
        })
    }

    fn identity<'a>(
        &self,
        user: Option<&'a UserRecord>,
    ) -> std::result::Result<(&'a UserRecord, Role), DecisionReason> {
        let Some(user) = user else {
            return Err(DecisionReason::MissingUser);
        };
        match user.role {
            Some(role) => Ok((user, role)),
            None => {
                warn!(
                    user_id = user.id_str().unwrap_or("<unknown>"),
                    "User record without a recognized role reached the authorizer"
                );
                Err(DecisionReason::MissingRole)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnlistedRoutePolicy;
    use crate::user::PermissionOverrides;

    #[test]
    fn test_permission_reasons() {
        let authz = Authorizer::new();

        let admin = UserRecord::new(Role::Admin);
        let decision = authz.explain_permission(Some(&admin), Permission::ManageBilling);
        assert_eq!(decision, AccessDecision::allow(DecisionReason::AdminBypass));

        let mentor =
            UserRecord::new(Role::PartnerInstructor).with_overrides(PermissionOverrides::new());
        let decision = authz.explain_permission(Some(&mentor), Permission::GradeAssignments);
        assert!(!decision.allowed);
        assert_eq!(
            decision.reason,
            DecisionReason::Override {
                permission: Permission::GradeAssignments
            }
        );

        let decision = authz.explain_permission(None, Permission::ViewCourses);
        assert_eq!(decision, AccessDecision::deny(DecisionReason::MissingUser));

        let nobody = UserRecord::without_role();
        let decision = authz.explain_permission(Some(&nobody), Permission::ViewCourses);
        assert_eq!(decision, AccessDecision::deny(DecisionReason::MissingRole));
    }

    #[test]
    fn test_route_reasons() {
        let authz = Authorizer::new();
        let student = UserRecord::new(Role::Student);

        let decision = authz.explain_route(Some(&student), "/admin/users");
        assert!(!decision.allowed);
        assert_eq!(
            decision.reason,
            DecisionReason::RouteRule {
                prefix: "/admin".to_string(),
                role: Role::Student
            }
        );

        let decision = authz.explain_route(Some(&student), "/help");
        assert!(decision.allowed);
        assert_eq!(
            decision.reason,
            DecisionReason::UnlistedRoute {
                policy: UnlistedRoutePolicy::Allow
            }
        );
    }

    #[test]
    fn test_deny_unlisted_config() {
        let authz = Authorizer::with_config(RbacConfig {
            unlisted_routes: UnlistedRoutePolicy::Deny,
            ..RbacConfig::default()
        });
        let student = UserRecord::new(Role::Student);

        assert!(!authz.can_access_route(Some(&student), "/help"));
        assert!(authz.can_access_route(Some(&student), "/courses"));
        assert_eq!(
            authz.guard_navigation(Some(&student), "/help"),
            GuardOutcome::RedirectToHome("/student")
        );
    }

    #[test]
    fn test_role_change_reasons() {
        let authz = Authorizer::new();

        assert!(authz.is_valid_role_change("student", "instructor"));

        let decision = authz.explain_role_change("student", "bogus_role");
        assert!(!decision.allowed);
        let DecisionReason::RoleChange { detail, .. } = decision.reason else {
            panic!("expected a role change reason");
        };
        assert!(detail.unwrap().contains("bogus_role"));
    }

    #[test]
    fn test_management_reasons() {
        let authz = Authorizer::new();
        let instructor = UserRecord::new(Role::Instructor);
        let student = UserRecord::new(Role::Student);

        let decision = authz.explain_management(Some(&instructor), Some(&student));
        assert!(decision.allowed);
        assert_eq!(
            decision.reason,
            DecisionReason::Management {
                actor: Role::Instructor,
                target: Some(Role::Student)
            }
        );

        assert!(!authz.can_manage_user(Some(&instructor), None));
        assert!(!authz.can_manage_user(None, Some(&student)));
    }

    #[test]
    fn test_silent_config_still_decides() {
        let authz = Authorizer::with_config(RbacConfig {
            trace_decisions: false,
            ..RbacConfig::default()
        });

        let student = UserRecord::new(Role::Student);
        assert!(authz.has_permission(Some(&student), Permission::TakeQuizzes));
    }
}
