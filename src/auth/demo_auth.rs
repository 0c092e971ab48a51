use serde::{Deserialize, Serialize};

use crate::auth::models::{AuthenticatedUser, Role};
use crate::error::AppError;

/// Cookie carrying the signed-in demo user as JSON.
pub const SESSION_COOKIE: &str = "sala_session";

/// Built-in demo user definition.
#[derive(Debug, Clone)]
struct DemoUser {
    username: &'static str,
    password: &'static str,
    display_name: &'static str,
    role: Role,
    email: &'static str,
}

/// The hard-coded demo users available when demo mode is on.
const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "student",
        password: "student",
        display_name: "Sokha Chan",
        role: Role::Student,
        email: "student@demo.sala.academy",
    },
    DemoUser {
        username: "staff",
        password: "staff",
        display_name: "Vanna Sok",
        role: Role::Staff,
        email: "staff@demo.sala.academy",
    },
    DemoUser {
        username: "admin",
        password: "admin",
        display_name: "Academy Admin",
        role: Role::Admin,
        email: "admin@demo.sala.academy",
    },
];

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: AuthenticatedUser,
}

/// Validate demo credentials and return the corresponding user.
pub fn authenticate_demo_user(username: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
    DEMO_USERS
        .iter()
        .find(|u| u.username == username.trim() && u.password == password)
        .map(|u| AuthenticatedUser {
            user_id: format!("demo-{}", u.username),
            display_name: u.display_name.to_string(),
            email: u.email.to_string(),
            role: u.role,
        })
        .ok_or_else(|| AppError::Auth("Invalid username or password".into()))
}

/// Decode the session cookie value.
pub fn decode_session(raw: &str) -> Result<AuthenticatedUser, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::Auth(format!("Invalid session: {}", e)))
}

#[cfg(feature = "ssr")]
mod handlers {
    use axum::extract::State;
    use axum::Json;
    use axum_extra::extract::cookie::{Cookie, SameSite};
    use axum_extra::extract::CookieJar;

    use super::*;
    use crate::app::AppState;
    use crate::auth::middleware::current_user;

    /// `POST /api/auth/login`
    ///
    /// Validates credentials against the built-in user table and stores the
    /// user in the `sala_session` cookie.
    pub async fn login_handler(
        State(state): State<AppState>,
        jar: CookieJar,
        Json(req): Json<LoginRequest>,
    ) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
        if !state.demo_mode {
            return Err(AppError::Forbidden("Demo accounts are disabled".into()));
        }

        let user = authenticate_demo_user(&req.username, &req.password)?;

        let user_json = serde_json::to_string(&user)
            .map_err(|e| AppError::Internal(format!("Failed to serialize user: {}", e)))?;

        let cookie = Cookie::build((SESSION_COOKIE, user_json))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        tracing::info!(user_id = %user.user_id, role = %user.role, "Demo user signed in");

        Ok((
            jar.add(cookie),
            Json(LoginResponse {
                message: "Login successful".to_string(),
                user,
            }),
        ))
    }

    /// `GET /api/auth/me`
    pub async fn me_handler(jar: CookieJar) -> Result<Json<AuthenticatedUser>, AppError> {
        Ok(Json(current_user(&jar)?))
    }

    /// `POST /api/auth/logout`
    pub async fn logout_handler(jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").removal().build();
        jar.remove(cookie)
    }
}

#[cfg(feature = "ssr")]
pub use handlers::{login_handler, logout_handler, me_handler};
