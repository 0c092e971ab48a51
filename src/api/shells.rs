use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;

use crate::app::AppState;
use crate::auth::middleware::{current_user, ensure_role, session_context};
use crate::auth::models::{AuthenticatedUser, Role};
use crate::content::shells::{DashboardView, PortalView};
use crate::content::store::ContentStore;
use crate::error::AppError;

/// Admin dashboard data for `user`. Staff or higher only.
pub fn dashboard_view(
    store: &ContentStore,
    user: AuthenticatedUser,
) -> Result<DashboardView, AppError> {
    ensure_role(&user, Role::Staff)?;
    let dashboard = store.dashboard().clone();
    Ok(DashboardView {
        session: session_context(user, &dashboard),
        dashboard,
    })
}

/// Student portal data for `user`.
pub fn portal_view(store: &ContentStore, user: AuthenticatedUser) -> Result<PortalView, AppError> {
    let student = store
        .portal()
        .student(&user.user_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No student record for '{}'", user.user_id)))?;

    let course_titles = student
        .courses
        .iter()
        .filter_map(|c| store.program(&c.program_id))
        .map(|p| (p.id.clone(), p.title.clone()))
        .collect();

    Ok(PortalView {
        session: session_context(user, store.dashboard()),
        student,
        course_titles,
    })
}

/// `GET /api/v1/admin/dashboard`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<DashboardView>, AppError> {
    let user = current_user(&jar)?;
    Ok(Json(dashboard_view(state.content.as_ref(), user)?))
}

/// `GET /api/v1/portal`
pub async fn portal_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PortalView>, AppError> {
    let user = current_user(&jar)?;
    Ok(Json(portal_view(state.content.as_ref(), user)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::demo_auth::authenticate_demo_user;

    #[test]
    fn test_students_cannot_open_dashboard() {
        let student = authenticate_demo_user("student", "student").unwrap();
        let result = dashboard_view(ContentStore::embedded(), student);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_staff_dashboard_counts_unread() {
        let store = ContentStore::embedded();
        let staff = authenticate_demo_user("staff", "staff").unwrap();
        let view = dashboard_view(store, staff).unwrap();
        assert_eq!(
            view.session.unread_notifications,
            store.dashboard().unread_notifications()
        );
    }

    #[test]
    fn test_demo_student_has_portal_record() {
        let store = ContentStore::embedded();
        let student = authenticate_demo_user("student", "student").unwrap();
        let view = portal_view(store, student).unwrap();
        assert!(!view.student.courses.is_empty());
        for course in &view.student.courses {
            assert!(view.course_title(&course.program_id).is_some());
        }
    }

    #[test]
    fn test_staff_without_record_gets_not_found() {
        let staff = authenticate_demo_user("staff", "staff").unwrap();
        let result = portal_view(ContentStore::embedded(), staff);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
