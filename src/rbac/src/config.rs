//! Authorizer configuration
//!
//! The role, permission and route tables are compiled in. Only the knobs
//! around them are configurable.
//!
//! Environment variables:
//! - `LMS_RBAC_UNLISTED_ROUTES` - `allow` or `deny` (default: allow)
//! - `LMS_RBAC_TRACE_DECISIONS` - `true` or `false` (default: true)

use crate::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const UNLISTED_ROUTES_VAR: &str = "LMS_RBAC_UNLISTED_ROUTES";
const TRACE_DECISIONS_VAR: &str = "LMS_RBAC_TRACE_DECISIONS";

/// Outcome for paths that match no entry of the route table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlistedRoutePolicy {
    /// Any user with a recognized role may view the path
    #[default]
    Allow,
    /// Nobody may view the path
    Deny,
}

impl FromStr for UnlistedRoutePolicy {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(RbacError::Config(format!(
                "unlisted route policy must be 'allow' or 'deny', got '{}'",
                other
            ))),
        }
    }
}

/// Authorizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RbacConfig {
    /// Policy for paths outside the route table
    pub unlisted_routes: UnlistedRoutePolicy,

    /// Emit a debug event for every decision
    pub trace_decisions: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            unlisted_routes: UnlistedRoutePolicy::Allow,
            trace_decisions: true,
        }
    }
}

impl RbacConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(UNLISTED_ROUTES_VAR) {
            config.unlisted_routes = raw.parse()?;
        }

        if let Some(raw) = lookup(TRACE_DECISIONS_VAR) {
            config.trace_decisions = raw.trim().parse().map_err(|_| {
                RbacError::Config(format!(
                    "{} must be 'true' or 'false', got '{}'",
                    TRACE_DECISIONS_VAR, raw
                ))
            })?;
        }

        Ok(config)
    }
}
