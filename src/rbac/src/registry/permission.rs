//! Permission taxonomy
//!
//! Permissions live in one flat namespace. The audience grouping documents who
//! a permission was written for and drives permission editors; nothing stops a
//! permission from one audience being granted in another role's context.

use crate::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who a permission is conceptually written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Student,
    PartnerInstructor,
    Instructor,
    Admin,
}

macro_rules! permissions {
    ($( $(#[$doc:meta])* $variant:ident => $tag:literal, $audience:ident, $label:literal; )+) => {
        /// Fine-grained capability tag
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Permission {
            $( $(#[$doc])* $variant, )+
        }

        impl Permission {
            /// Every permission, in declaration order
            pub const ALL: &'static [Permission] = &[ $( Permission::$variant, )+ ];

            /// Parse a permission tag (exact match)
            pub fn parse(tag: &str) -> Option<Self> {
                match tag {
                    $( $tag => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Wire tag for this permission
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }

            /// Audience the permission was written for
            pub fn audience(&self) -> Audience {
                match self {
                    $( Self::$variant => Audience::$audience, )+
                }
            }

            /// Label shown in permission editors
            pub fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }
    };
}

permissions! {
    // Student
    ViewCourses => "view_courses", Student, "View courses";
    EnrollCourses => "enroll_courses", Student, "Enroll in courses";
    ViewOwnProgress => "view_own_progress", Student, "View own progress";
    SubmitAssignments => "submit_assignments", Student, "Submit assignments";
    TakeQuizzes => "take_quizzes", Student, "Take quizzes";
    ViewOwnGrades => "view_own_grades", Student, "View own grades";
    PostDiscussions => "post_discussions", Student, "Post in discussions";
    ViewCertificates => "view_certificates", Student, "View certificates";

    // Partner instructor
    ViewCourseContent => "view_course_content", PartnerInstructor, "View course content";
    /// Only meaningful together with mentor assignments held outside this crate
    ViewAssignedStudents => "view_assigned_students", PartnerInstructor, "View assigned students";
    GradeAssignments => "grade_assignments", PartnerInstructor, "Grade assignments";
    ProvideFeedback => "provide_feedback", PartnerInstructor, "Provide feedback";
    ViewStudentProgress => "view_student_progress", PartnerInstructor, "View student progress";
    MessageStudents => "message_students", PartnerInstructor, "Message students";
    ScheduleSessions => "schedule_sessions", PartnerInstructor, "Schedule sessions";

    // Instructor
    CreateCourses => "create_courses", Instructor, "Create courses";
    EditCourses => "edit_courses", Instructor, "Edit courses";
    PublishCourses => "publish_courses", Instructor, "Publish courses";
    DeleteCourses => "delete_courses", Instructor, "Delete courses";
    ManageCurriculum => "manage_curriculum", Instructor, "Manage curriculum";
    CreateAssignments => "create_assignments", Instructor, "Create assignments";
    CreateQuizzes => "create_quizzes", Instructor, "Create quizzes";
    ManageEnrollments => "manage_enrollments", Instructor, "Manage enrollments";
    ViewCourseAnalytics => "view_course_analytics", Instructor, "View course analytics";

    // Admin
    ManageUsers => "manage_users", Admin, "Manage users";
    ManageRoles => "manage_roles", Admin, "Manage roles";
    ManagePermissions => "manage_permissions", Admin, "Manage permissions";
    AssignMentors => "assign_mentors", Admin, "Assign mentors";
    ViewPlatformAnalytics => "view_platform_analytics", Admin, "View platform analytics";
    ManageSettings => "manage_settings", Admin, "Manage settings";
    ViewAuditLog => "view_audit_log", Admin, "View audit log";
    ManageBilling => "manage_billing", Admin, "Manage billing";
}

/// Permissions written for `audience`, in declaration order
pub fn permissions_for_audience(audience: Audience) -> Vec<Permission> {
    Permission::ALL
        .iter()
        .copied()
        .filter(|p| p.audience() == audience)
        .collect()
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownPermission(s.to_string()))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
