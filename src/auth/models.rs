use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles of the mock accounts behind the admin and student shells.
///
/// The order of variants matters: it defines the privilege hierarchy.
/// `Student` is the least privileged, `Admin` is the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Enrolled learner; sees the student portal.
    Student = 0,
    /// Academy staff; sees the admin dashboard.
    Staff = 1,
    /// Full administrative access.
    Admin = 2,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Staff => write!(f, "staff"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl Role {
    /// Parse a role from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "staff" => Some(Role::Staff),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns `true` if `self` is at least as privileged as `required`.
    pub fn has_access(&self, required: Role) -> bool {
        *self >= required
    }
}

/// A signed-in (mock) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

/// What the admin and portal shells need to know about the visitor.
///
/// Handed to shell components as a value instead of living in a global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: AuthenticatedUser,
    pub unread_notifications: usize,
}
