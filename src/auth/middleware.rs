use crate::auth::demo_auth::{decode_session, SESSION_COOKIE};
use crate::auth::models::{AuthenticatedUser, Role, SessionContext};
use crate::content::shells::Dashboard;
use crate::error::AppError;

/// Reject `user` unless their role is at least `required`.
pub fn ensure_role(user: &AuthenticatedUser, required: Role) -> Result<(), AppError> {
    if user.role.has_access(required) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Requires the {} role, signed in as {}",
            required, user.role
        )))
    }
}

/// Build the shell context for `user`.
///
/// Only staff see dashboard notifications; students always get zero.
pub fn session_context(user: AuthenticatedUser, dashboard: &Dashboard) -> SessionContext {
    let unread_notifications = if user.role.has_access(Role::Staff) {
        dashboard.unread_notifications()
    } else {
        0
    };
    SessionContext {
        user,
        unread_notifications,
    }
}

/// The user stored in the session cookie, if any.
#[cfg(feature = "ssr")]
pub fn current_user(jar: &axum_extra::extract::CookieJar) -> Result<AuthenticatedUser, AppError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Auth("Not logged in".into()))?;
    decode_session(cookie.value())
}
