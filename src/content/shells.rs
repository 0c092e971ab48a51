//! Static fixtures backing the admin dashboard and student portal shells.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::models::LocalizedText;
use crate::auth::models::SessionContext;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_enrollments: Vec<EnrollmentRecord>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Dashboard {
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: u32,
    pub active_programs: u32,
    pub pending_enrollments: u32,
    pub monthly_inquiries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Waitlisted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub id: String,
    pub student_name: String,
    pub program_id: String,
    pub submitted_on: NaiveDate,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: LocalizedText,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub read: bool,
}

/// All student records shown in the portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    #[serde(default)]
    pub students: Vec<StudentRecord>,
}

impl Portal {
    pub fn student(&self, user_id: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.user_id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Matches `AuthenticatedUser::user_id`.
    pub user_id: String,
    pub display_name: LocalizedText,
    #[serde(default)]
    pub courses: Vec<CourseProgress>,
    #[serde(default)]
    pub upcoming_sessions: Vec<Session>,
    #[serde(default)]
    pub announcements: Vec<LocalizedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    pub program_id: String,
    /// 0-100.
    pub progress_percent: u8,
    #[serde(default)]
    pub completed_modules: u32,
    #[serde(default)]
    pub total_modules: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub title: LocalizedText,
    pub starts_at: NaiveDateTime,
    pub location: LocalizedText,
}

/// Everything the admin dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub session: SessionContext,
    pub dashboard: Dashboard,
}

/// Everything the student portal page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalView {
    pub session: SessionContext,
    pub student: StudentRecord,
    /// Program titles for the enrolled courses, keyed by program id.
    pub course_titles: Vec<(String, LocalizedText)>,
}

impl PortalView {
    pub fn course_title(&self, program_id: &str) -> Option<&LocalizedText> {
        self.course_titles
            .iter()
            .find(|(id, _)| id == program_id)
            .map(|(_, title)| title)
    }
}
