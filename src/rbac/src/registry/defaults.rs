//! Default permission set per role
//!
//! Each role's defaults are enumerated on their own. Instructor repeats the
//! partner instructor and student members instead of inheriting them, and the
//! management hierarchy in [`Role::hierarchy`] is maintained separately. Use
//! [`hierarchy_divergences`] to catch the two drifting apart.

use super::permission::Permission;
use super::role::Role;
use std::collections::BTreeSet;

use Permission::*;

const STUDENT_DEFAULTS: &[Permission] = &[
    ViewCourses,
    EnrollCourses,
    ViewOwnProgress,
    SubmitAssignments,
    TakeQuizzes,
    ViewOwnGrades,
    PostDiscussions,
    ViewCertificates,
];

const PARTNER_INSTRUCTOR_DEFAULTS: &[Permission] = &[
    ViewCourses,
    EnrollCourses,
    ViewOwnProgress,
    SubmitAssignments,
    TakeQuizzes,
    ViewOwnGrades,
    PostDiscussions,
    ViewCertificates,
    ViewCourseContent,
    ViewAssignedStudents,
    GradeAssignments,
    ProvideFeedback,
    ViewStudentProgress,
    MessageStudents,
    ScheduleSessions,
];

const INSTRUCTOR_DEFAULTS: &[Permission] = &[
    ViewCourses,
    EnrollCourses,
    ViewOwnProgress,
    SubmitAssignments,
    TakeQuizzes,
    ViewOwnGrades,
    PostDiscussions,
    ViewCertificates,
    ViewCourseContent,
    ViewAssignedStudents,
    GradeAssignments,
    ProvideFeedback,
    ViewStudentProgress,
    MessageStudents,
    ScheduleSessions,
    CreateCourses,
    EditCourses,
    PublishCourses,
    DeleteCourses,
    ManageCurriculum,
    CreateAssignments,
    CreateQuizzes,
    ManageEnrollments,
    ViewCourseAnalytics,
];

/// Enumerated default table for a role. Admin is the full enumeration.
pub fn default_permission_list(role: Role) -> &'static [Permission] {
    match role {
        Role::Student => STUDENT_DEFAULTS,
        Role::PartnerInstructor => PARTNER_INSTRUCTOR_DEFAULTS,
        Role::Instructor => INSTRUCTOR_DEFAULTS,
        Role::Admin => Permission::ALL,
    }
}

/// Default permission set for a role
pub fn default_permissions(role: Role) -> BTreeSet<Permission> {
    default_permission_list(role).iter().copied().collect()
}

/// Default permission set for a raw role tag; empty when the tag is unknown
pub fn default_permissions_for_tag(tag: &str) -> BTreeSet<Permission> {
    Role::parse(tag).map(default_permissions).unwrap_or_default()
}

/// Whether `permission` is in the role's default set
pub fn role_grants_by_default(role: Role, permission: Permission) -> bool {
    default_permission_list(role).contains(&permission)
}

/// A lower role's default permission missing from a higher role's defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyDivergence {
    pub higher: Role,
    pub lower: Role,
    pub permission: Permission,
}

/// Compare the default tables against the management hierarchy.
///
/// For every role and every role it encompasses, reports each default of the
/// lower role the higher role does not also hold by default.
pub fn hierarchy_divergences() -> Vec<HierarchyDivergence> {
    let mut divergences = Vec::new();

    for higher in Role::ALL {
        for &lower in higher.hierarchy().iter().filter(|&&r| r != higher) {
            for &permission in default_permission_list(lower) {
                if !role_grants_by_default(higher, permission) {
                    divergences.push(HierarchyDivergence {
                        higher,
                        lower,
                        permission,
                    });
                }
            }
        }
    }

    divergences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_sizes() {
        assert_eq!(default_permissions(Role::Student).len(), 8);
        assert_eq!(default_permissions(Role::PartnerInstructor).len(), 15);
        assert_eq!(default_permissions(Role::Instructor).len(), 24);
        assert_eq!(default_permissions(Role::Admin).len(), Permission::ALL.len());
    }

    #[test]
    fn test_enumerated_tables_have_no_duplicates() {
        for role in Role::ALL {
            let list = default_permission_list(role);
            assert_eq!(
                list.len(),
                default_permissions(role).len(),
                "{} repeats a permission",
                role
            );
        }
    }

    #[test]
    fn test_student_membership() {
        let defaults = default_permissions(Role::Student);
        assert!(defaults.contains(&SubmitAssignments));
        assert!(!defaults.contains(&GradeAssignments));
        assert!(!defaults.contains(&ManageUsers));
    }

    #[test]
    fn test_instructor_membership() {
        assert!(role_grants_by_default(Role::Instructor, PublishCourses));
        assert!(role_grants_by_default(Role::Instructor, GradeAssignments));
        assert!(!role_grants_by_default(Role::Instructor, ManageUsers));
        assert!(!role_grants_by_default(Role::Instructor, ViewAuditLog));
    }

    #[test]
    fn test_unknown_tag_has_no_defaults() {
        assert!(default_permissions_for_tag("bogus_role").is_empty());
        assert!(default_permissions_for_tag("").is_empty());
        assert_eq!(default_permissions_for_tag("student"), default_permissions(Role::Student));
    }

    #[test]
    fn test_tables_agree_with_hierarchy() {
        assert_eq!(hierarchy_divergences(), Vec::new());
    }
}
