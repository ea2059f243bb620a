//! Role taxonomy and the management hierarchy

use crate::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's primary capability tier
///
/// Variants are declared lowest first so the derived `Ord` follows the
/// hierarchy: `Student < PartnerInstructor < Instructor < Admin`. The ordering
/// is only used for management authority, never to compute permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Learner enrolled in courses
    Student,
    /// Mentor working with assigned students
    PartnerInstructor,
    /// Course author and owner
    Instructor,
    /// Platform administrator
    Admin,
}

impl Role {
    /// Every role, lowest first
    pub const ALL: [Role; 4] = [
        Role::Student,
        Role::PartnerInstructor,
        Role::Instructor,
        Role::Admin,
    ];

    /// Parse a role tag. Matching is exact: `"Admin"` is not a role.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "student" => Some(Self::Student),
            "partner_instructor" => Some(Self::PartnerInstructor),
            "instructor" => Some(Self::Instructor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Wire tag for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::PartnerInstructor => "partner_instructor",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
        }
    }

    /// Position in the management hierarchy (student = 0)
    pub fn level(&self) -> u8 {
        match self {
            Self::Student => 0,
            Self::PartnerInstructor => 1,
            Self::Instructor => 2,
            Self::Admin => 3,
        }
    }

    /// Home route the navigation guard redirects this role to
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Student => "/student",
            Self::PartnerInstructor => "/partner-instructor",
            Self::Instructor => "/instructor",
            Self::Admin => "/admin",
        }
    }

    /// The role itself followed by every role below it, highest first
    pub fn hierarchy(&self) -> &'static [Role] {
        match self {
            Self::Admin => &[
                Role::Admin,
                Role::Instructor,
                Role::PartnerInstructor,
                Role::Student,
            ],
            Self::Instructor => &[Role::Instructor, Role::PartnerInstructor, Role::Student],
            Self::PartnerInstructor => &[Role::PartnerInstructor, Role::Student],
            Self::Student => &[Role::Student],
        }
    }

    /// Whether `other` sits at or below this role in the hierarchy
    pub fn encompasses(&self, other: Role) -> bool {
        self.hierarchy().contains(&other)
    }
}

/// Roles encompassed by `role`, highest first. Empty for an unknown tag.
pub fn role_hierarchy(tag: &str) -> &'static [Role] {
    Role::parse(tag).map(|role| role.hierarchy()).unwrap_or(&[])
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
