mod common;

use serde_json::Value;

#[tokio::test]
async fn staff_sees_dashboard() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.login(&server, "staff").await;

    let view: Value = server.get("/api/v1/admin/dashboard").await.json();
    assert_eq!(view["session"]["user"]["role"], "Staff");
    assert_eq!(view["session"]["unread_notifications"], 2);
    assert_eq!(view["dashboard"]["stats"]["total_students"], 342);
    assert_eq!(view["dashboard"]["recent_enrollments"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn admin_inherits_staff_access() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.login(&server, "admin").await;
    server.get("/api/v1/admin/dashboard").await.assert_status_ok();
}

#[tokio::test]
async fn student_cannot_open_dashboard() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    env.login(&server, "student").await.assert_status_ok();
    server
        .get("/api/v1/admin/dashboard")
        .await
        .assert_status_forbidden();
}

#[tokio::test]
async fn student_sees_own_portal() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.login(&server, "student").await;

    let view: Value = server.get("/api/v1/portal").await.json();
    assert_eq!(view["student"]["user_id"], "demo-student");
    assert_eq!(view["session"]["unread_notifications"], 0);

    let courses = view["student"]["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["progress_percent"], 45);
    assert_eq!(view["course_titles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn staff_has_no_portal_record() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    env.login(&server, "staff").await.assert_status_ok();
    server.get("/api/v1/portal").await.assert_status_not_found();
}

#[tokio::test]
async fn shells_require_sign_in() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server
        .get("/api/v1/admin/dashboard")
        .await
        .assert_status_unauthorized();
    server.get("/api/v1/portal").await.assert_status_unauthorized();
}
