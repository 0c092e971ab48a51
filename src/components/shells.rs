//! Demo sign-in, admin dashboard and student portal pages.
//!
//! Both shells render fixture data only. The signed-in user and the
//! notification count travel in an explicit [`SessionContext`] loaded with
//! the page data.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::models::{AuthenticatedUser, Role, SessionContext};
use crate::components::layout::use_locale;
use crate::content::shells::{DashboardView, EnrollmentStatus, PortalView};
use crate::content::store::ContentStore;
use crate::i18n::locale::localized_path;
use crate::i18n::messages::{t, tf};

#[server(LoadDashboard, "/api")]
pub async fn load_dashboard() -> Result<DashboardView, ServerFnError> {
    use crate::api::shells::dashboard_view;
    use crate::app::AppState;
    use crate::auth::middleware::current_user;
    use axum_extra::extract::CookieJar;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;
    let jar = leptos_axum::extract::<CookieJar>().await?;
    let user = current_user(&jar).map_err(|e| ServerFnError::new(e.to_string()))?;
    dashboard_view(state.content.as_ref(), user).map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(LoadPortal, "/api")]
pub async fn load_portal() -> Result<PortalView, ServerFnError> {
    use crate::api::shells::portal_view;
    use crate::app::AppState;
    use crate::auth::middleware::current_user;
    use axum_extra::extract::CookieJar;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;
    let jar = leptos_axum::extract::<CookieJar>().await?;
    let user = current_user(&jar).map_err(|e| ServerFnError::new(e.to_string()))?;
    portal_view(state.content.as_ref(), user).map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(DemoLogin, "/api")]
pub async fn demo_login(username: String, password: String) -> Result<AuthenticatedUser, ServerFnError> {
    use crate::app::AppState;
    use crate::auth::demo_auth::{authenticate_demo_user, SESSION_COOKIE};
    use axum::http::{header, HeaderValue};
    use axum_extra::extract::cookie::{Cookie, SameSite};

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;
    if !state.demo_mode {
        return Err(ServerFnError::new("Demo accounts are disabled"));
    }

    let user = authenticate_demo_user(&username, &password)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let user_json = serde_json::to_string(&user)
        .map_err(|e| ServerFnError::new(format!("Failed to serialize user: {}", e)))?;
    let cookie = Cookie::build((SESSION_COOKIE, user_json))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let response = use_context::<leptos_axum::ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("ResponseOptions not found in context"))?;
    // Same encoding the `CookieJar` extractor decodes.
    let value = HeaderValue::from_str(&cookie.encoded().to_string())
        .map_err(|e| ServerFnError::new(format!("Invalid cookie: {}", e)))?;
    response.append_header(header::SET_COOKIE, value);

    tracing::info!(user_id = %user.user_id, role = %user.role, "Demo user signed in");
    Ok(user)
}

#[server(DemoLogout, "/api")]
pub async fn demo_logout() -> Result<(), ServerFnError> {
    use crate::auth::demo_auth::SESSION_COOKIE;
    use axum::http::{header, HeaderValue};
    use axum_extra::extract::cookie::Cookie;

    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").removal().build();
    let response = use_context::<leptos_axum::ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("ResponseOptions not found in context"))?;
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ServerFnError::new(format!("Invalid cookie: {}", e)))?;
    response.append_header(header::SET_COOKIE, value);
    Ok(())
}

/// Where a freshly signed-in user lands.
fn landing_page(role: Role) -> &'static str {
    if role.has_access(Role::Staff) {
        "admin"
    } else {
        "portal"
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let locale = use_locale();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let login = Action::new(|credentials: &(String, String)| {
        let (username, password) = credentials.clone();
        async move { demo_login(username, password).await }
    });

    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(Ok(user)) = login.value().get() {
            let target = localized_path(locale.get_untracked(), landing_page(user.role));
            navigate(&target, Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        login.dispatch((username.get_untracked(), password.get_untracked()));
    };

    view! {
        <section class="login-page">
            <h1>{move || t(locale.get(), "login.title")}</h1>
            <p class="hint">{move || t(locale.get(), "login.demo_hint")}</p>
            <form class="form" on:submit=on_submit>
                <label>
                    {move || t(locale.get(), "login.username")}
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=username
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    {move || t(locale.get(), "login.password")}
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                {move || {
                    matches!(login.value().get(), Some(Err(_)))
                        .then(|| view! { <p class="alert alert-error">{t(locale.get(), "login.failed")}</p> })
                }}
                <button type="submit" class="btn btn-primary" disabled=move || login.pending().get()>
                    {move || t(locale.get(), "login.submit")}
                </button>
            </form>
        </section>
    }
}

/// Header strip shown on both shells.
#[component]
fn SessionBar(session: SessionContext) -> impl IntoView {
    let locale = use_locale();
    let navigate = use_navigate();
    let logout = Action::new(|_: &()| demo_logout());

    Effect::new(move |_| {
        if let Some(Ok(())) = logout.value().get() {
            navigate(&localized_path(locale.get_untracked(), "login"), Default::default());
        }
    });

    let unread = session.unread_notifications;
    let name = session.user.display_name;
    let role = session.user.role;
    view! {
        <div class="session-bar">
            <span>
                {move || tf(locale.get(), "shell.signed_in_as", &[("name", name.clone())])}
            </span>
            <span class="badge">{role.to_string()}</span>
            <Show when=move || unread != 0>
                <span class="badge badge-alert">
                    {move || tf(locale.get(), "shell.unread", &[("count", unread.to_string())])}
                </span>
            </Show>
            <button class="btn btn-link" on:click=move |_| { logout.dispatch(()); }>
                {move || t(locale.get(), "shell.logout")}
            </button>
        </div>
    }
}

/// Shown when a shell's data could not be loaded for this visitor.
#[component]
fn SignInPrompt(message: String) -> impl IntoView {
    let locale = use_locale();
    view! {
        <div class="sign-in-prompt">
            <p>{message}</p>
            <a href=move || localized_path(locale.get(), "login")>{move || t(locale.get(), "login.title")}</a>
        </div>
    }
}

fn status_key(status: EnrollmentStatus) -> &'static str {
    match status {
        EnrollmentStatus::Pending => "admin.status.pending",
        EnrollmentStatus::Approved => "admin.status.approved",
        EnrollmentStatus::Waitlisted => "admin.status.waitlisted",
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let locale = use_locale();
    let data = Resource::new(|| (), |_| load_dashboard());

    view! {
        <section class="admin-shell">
            <h1>{move || t(locale.get(), "admin.title")}</h1>
            <Suspense fallback=move || view! { <p>{t(locale.get(), "common.loading")}</p> }>
                {move || data.get().map(|result| match result {
                    Ok(view) => view! { <Dashboard view=view/> }.into_any(),
                    Err(e) => view! { <SignInPrompt message=e.to_string()/> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn Dashboard(view: DashboardView) -> impl IntoView {
    let locale = use_locale();
    let store = ContentStore::embedded();
    let DashboardView { session, dashboard } = view;
    let stats = dashboard.stats;

    let stat_tiles = [
        ("admin.stats.students", stats.total_students),
        ("admin.stats.programs", stats.active_programs),
        ("admin.stats.pending", stats.pending_enrollments),
        ("admin.stats.inquiries", stats.monthly_inquiries),
    ];

    view! {
        <SessionBar session=session/>
        <div class="stat-grid">
            {stat_tiles
                .into_iter()
                .map(|(key, value)| view! {
                    <div class="stat-tile">
                        <span class="value">{value}</span>
                        <span class="label">{move || t(locale.get(), key)}</span>
                    </div>
                })
                .collect_view()}
        </div>

        <h2>{move || t(locale.get(), "admin.recent_enrollments")}</h2>
        <table class="data-table">
            <thead>
                <tr>
                    <th>{move || t(locale.get(), "admin.col.student")}</th>
                    <th>{move || t(locale.get(), "admin.col.program")}</th>
                    <th>{move || t(locale.get(), "admin.col.date")}</th>
                    <th>{move || t(locale.get(), "admin.col.status")}</th>
                </tr>
            </thead>
            <tbody>
                {dashboard
                    .recent_enrollments
                    .into_iter()
                    .map(|record| {
                        let program = store.program(&record.program_id);
                        let status = record.status;
                        view! {
                            <tr>
                                <td>{record.student_name}</td>
                                <td>
                                    {move || program
                                        .map(|p| p.title.get(locale.get()).to_string())
                                        .unwrap_or_default()}
                                </td>
                                <td>{record.submitted_on.format("%Y-%m-%d").to_string()}</td>
                                <td>{move || t(locale.get(), status_key(status))}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>

        <h2>{move || t(locale.get(), "admin.notifications")}</h2>
        <ul class="notifications">
            {dashboard
                .notifications
                .into_iter()
                .map(|n| {
                    let unread = !n.read;
                    let created_on = n.created_on.format("%Y-%m-%d").to_string();
                    let message = n.message;
                    view! {
                        <li class:unread=unread>
                            <span>{move || message.get(locale.get()).to_string()}</span>
                            <small>{created_on}</small>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn PortalPage() -> impl IntoView {
    let locale = use_locale();
    let data = Resource::new(|| (), |_| load_portal());

    view! {
        <section class="portal-shell">
            <h1>{move || t(locale.get(), "portal.title")}</h1>
            <Suspense fallback=move || view! { <p>{t(locale.get(), "common.loading")}</p> }>
                {move || data.get().map(|result| match result {
                    Ok(view) => view! { <StudentPortal view=view/> }.into_any(),
                    Err(e) => view! { <SignInPrompt message=e.to_string()/> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn StudentPortal(view: PortalView) -> impl IntoView {
    let locale = use_locale();
    let courses = view
        .student
        .courses
        .iter()
        .map(|course| {
            let title = view.course_title(&course.program_id).cloned().unwrap_or_default();
            (title, course.clone())
        })
        .collect::<Vec<_>>();
    let PortalView { session, student, .. } = view;
    let display_name = student.display_name;

    view! {
        <SessionBar session=session/>
        <h2>
            {move || tf(locale.get(), "portal.welcome", &[("name", display_name.get(locale.get()).to_string())])}
        </h2>

        <h3>{move || t(locale.get(), "portal.courses")}</h3>
        <ul class="course-list">
            {courses
                .into_iter()
                .map(|(title, course)| view! {
                    <li class="course">
                        <span>{move || title.get(locale.get()).to_string()}</span>
                        <progress max="100" value=course.progress_percent.to_string()></progress>
                        <small>
                            {move || tf(
                                locale.get(),
                                "portal.modules",
                                &[
                                    ("done", course.completed_modules.to_string()),
                                    ("total", course.total_modules.to_string()),
                                ],
                            )}
                        </small>
                    </li>
                })
                .collect_view()}
        </ul>

        <h3>{move || t(locale.get(), "portal.sessions")}</h3>
        <ul class="sessions">
            {student
                .upcoming_sessions
                .into_iter()
                .map(|s| {
                    let starts_at = s.starts_at.format("%Y-%m-%d %H:%M").to_string();
                    let (title, location) = (s.title, s.location);
                    view! {
                        <li>
                            <strong>{move || title.get(locale.get()).to_string()}</strong>
                            " · " {starts_at} " · "
                            {move || location.get(locale.get()).to_string()}
                        </li>
                    }
                })
                .collect_view()}
        </ul>

        <h3>{move || t(locale.get(), "portal.announcements")}</h3>
        <ul class="announcements">
            {student
                .announcements
                .into_iter()
                .map(|a| view! { <li>{move || a.get(locale.get()).to_string()}</li> })
                .collect_view()}
        </ul>
    }
}
