//! User record consumed by every authorization decision
//!
//! Records are built by the session/persistence layer, usually from an untyped
//! document. Deserialization is lenient: a role or override value that does
//! not fit the typed model is dropped instead of failing the whole record, so
//! malformed identity data reaches the resolvers as "missing" and is denied
//! there.

use crate::registry::{Permission, Role};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-user permission map that replaces the role defaults when present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionOverrides(BTreeMap<Permission, bool>);

impl PermissionOverrides {
    /// Create an empty override map (grants nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a permission explicitly
    pub fn with(mut self, permission: Permission, granted: bool) -> Self {
        self.0.insert(permission, granted);
        self
    }

    /// Set a permission explicitly
    pub fn set(&mut self, permission: Permission, granted: bool) {
        self.0.insert(permission, granted);
    }

    /// Whether the map explicitly grants `permission`
    pub fn grants(&self, permission: Permission) -> bool {
        self.0.get(&permission).copied().unwrap_or(false)
    }

    /// Explicit value for `permission`, if any
    pub fn get(&self, permission: Permission) -> Option<bool> {
        self.0.get(&permission).copied()
    }

    /// Permissions explicitly set to `true`
    pub fn granted(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(&permission, _)| permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret an untyped value.
    ///
    /// Only a JSON object is a mapping. Entries whose key is not a permission
    /// tag or whose value is not a boolean are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(entries) = value else {
            if !value.is_null() {
                debug!("Ignoring permission overrides that are not a mapping: {}", value);
            }
            return None;
        };

        let mut overrides = Self::new();
        for (key, raw) in entries {
            match (Permission::parse(key), raw.as_bool()) {
                (Some(permission), Some(granted)) => overrides.set(permission, granted),
                _ => debug!("Dropping permission override entry {}={}", key, raw),
            }
        }

        Some(overrides)
    }
}

impl FromIterator<(Permission, bool)> for PermissionOverrides {
    fn from_iter<I: IntoIterator<Item = (Permission, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The identity snapshot an authorization decision is made over
///
/// Only `role` and `permission_overrides` are inspected. Identity fields and
/// any other document fields are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque identity value, kept as it appears in the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,

    /// `None` when the record has no recognized role
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,

    /// `None` when absent, null or not a mapping
    #[serde(
        default,
        deserialize_with = "lenient_overrides",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_overrides: Option<PermissionOverrides>,

    /// Remaining document fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Create a record with the given role
    pub fn new(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Create a record without a role (denied everywhere)
    pub fn without_role() -> Self {
        Self::default()
    }

    /// Set the identity fields
    pub fn with_identity(mut self, id: impl Into<String>, email: impl Into<String>) -> Self {
        self.id = Some(Value::String(id.into()));
        self.email = Some(Value::String(email.into()));
        self
    }

    /// The `id` field when it is a string
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }

    /// The `email` field when it is a string
    pub fn email_str(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }

    /// Attach a permission override map
    pub fn with_overrides(mut self, overrides: PermissionOverrides) -> Self {
        self.permission_overrides = Some(overrides);
        self
    }

    /// Decode a record from an untyped document
    pub fn from_value(value: Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a record from a JSON string
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn lenient_role<'de, D>(deserializer: D) -> std::result::Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let role = value.as_str().and_then(Role::parse);

    if role.is_none() && !value.is_null() {
        debug!("Unrecognized role value {}", value);
    }

    Ok(role)
}

fn lenient_overrides<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<PermissionOverrides>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(PermissionOverrides::from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_record() {
        let user = UserRecord::from_value(json!({
            "id": "u-1",
            "email": "mentor@example.com",
            "role": "partner_instructor",
            "permissionOverrides": {
                "grade_assignments": true,
                "message_students": false
            },
            "displayName": "Mentor"
        }))
        .unwrap();

        assert_eq!(user.id_str(), Some("u-1"));
        assert_eq!(user.email_str(), Some("mentor@example.com"));
        assert_eq!(user.role, Some(Role::PartnerInstructor));

        let overrides = user.permission_overrides.as_ref().unwrap();
        assert!(overrides.grants(Permission::GradeAssignments));
        assert_eq!(overrides.get(Permission::MessageStudents), Some(false));
        assert_eq!(user.extra.get("displayName"), Some(&json!("Mentor")));
    }

    #[test]
    fn test_unknown_role_becomes_none() {
        let user = UserRecord::from_value(json!({ "role": "superuser" })).unwrap();
        assert_eq!(user.role, None);

        let user = UserRecord::from_value(json!({ "role": 3 })).unwrap();
        assert_eq!(user.role, None);

        let user = UserRecord::from_value(json!({ "role": null })).unwrap();
        assert_eq!(user.role, None);

        let user = UserRecord::from_value(json!({})).unwrap();
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_malformed_override_entries_are_dropped() {
        let user = UserRecord::from_value(json!({
            "role": "partner_instructor",
            "permissionOverrides": {
                "grade_assignments": "true",
                "provide_feedback": 1,
                "not_a_permission": true,
                "schedule_sessions": true
            }
        }))
        .unwrap();

        let overrides = user.permission_overrides.unwrap();
        assert_eq!(overrides.len(), 1);
        assert!(overrides.grants(Permission::ScheduleSessions));
        assert!(!overrides.grants(Permission::GradeAssignments));
    }

    #[test]
    fn test_non_mapping_overrides_are_absent() {
        let malformed = [
            json!("all"),
            json!(true),
            json!(7),
            json!(["grade_assignments"]),
            json!(null),
        ];
        for raw in malformed {
            let user = UserRecord::from_value(json!({
                "role": "student",
                "permissionOverrides": raw
            }))
            .unwrap();
            assert!(user.permission_overrides.is_none());
        }
    }

    #[test]
    fn test_empty_mapping_is_present() {
        let user = UserRecord::from_value(json!({
            "role": "partner_instructor",
            "permissionOverrides": {}
        }))
        .unwrap();

        assert_eq!(user.permission_overrides, Some(PermissionOverrides::new()));
    }

    #[test]
    fn test_serializes_camel_case() {
        let user = UserRecord::new(Role::PartnerInstructor)
            .with_identity("u-2", "p@example.com")
            .with_overrides(PermissionOverrides::new().with(Permission::GradeAssignments, true));

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], json!("partner_instructor"));
        assert_eq!(value["permissionOverrides"]["grade_assignments"], json!(true));

        let decoded = UserRecord::from_value(value).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_granted_iterates_true_entries() {
        let overrides: PermissionOverrides = [
            (Permission::GradeAssignments, true),
            (Permission::MessageStudents, false),
            (Permission::ProvideFeedback, true),
        ]
        .into_iter()
        .collect();

        let granted: Vec<_> = overrides.granted().collect();
        assert_eq!(granted, vec![Permission::GradeAssignments, Permission::ProvideFeedback]);
    }

    #[test]
    fn test_non_string_identity_fields_are_carried_through() {
        let user = UserRecord::from_value(json!({ "id": 42, "role": "admin" })).unwrap();
        assert_eq!(user.role, Some(Role::Admin));
        assert_eq!(user.id, Some(json!(42)));
        assert_eq!(user.id_str(), None);

        let user = UserRecord::from_value(json!({
            "email": { "primary": "a@b" },
            "role": "student"
        }))
        .unwrap();
        assert_eq!(user.role, Some(Role::Student));
        assert_eq!(user.email, Some(json!({ "primary": "a@b" })));

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"]["primary"], json!("a@b"));
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        assert!(UserRecord::from_json("{ not json").is_err());
    }
}
