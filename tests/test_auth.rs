mod common;

#[tokio::test]
async fn login_success_sets_cookie() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = env.login(&server, "student").await;
    response.assert_status_ok();

    let cookie = response.cookie("sala_session");
    assert_eq!(cookie.http_only(), Some(true));

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str(), Some("Login successful"));
}

#[tokio::test]
async fn login_returns_user_info() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: serde_json::Value = env.login(&server, "staff").await.json();
    let user = &body["user"];
    assert_eq!(user["user_id"].as_str(), Some("demo-staff"));
    assert_eq!(user["email"].as_str(), Some("staff@demo.sala.academy"));
    assert_eq!(user["role"].as_str(), Some("Staff"));
}

#[tokio::test]
async fn login_invalid_credentials() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": "student",
            "password": "wrongpassword"
        }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn login_disabled_outside_demo_mode() {
    let env = common::TestEnv::start_with(false).await;
    let server = env.server_permissive();

    env.login(&server, "admin").await.assert_status_forbidden();
}

#[tokio::test]
async fn me_with_valid_cookie() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.login(&server, "admin").await;

    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();

    let user: serde_json::Value = response.json();
    assert_eq!(user["user_id"].as_str(), Some("demo-admin"));
    assert_eq!(user["role"].as_str(), Some("Admin"));
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server.get("/api/auth/me").await.assert_status_unauthorized();
}

#[tokio::test]
async fn logout_clears_session() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    env.login(&server, "student").await.assert_status_ok();
    server.get("/api/auth/me").await.assert_status_ok();

    server.post("/api/auth/logout").await.assert_status_ok();
    server.get("/api/auth/me").await.assert_status_unauthorized();
}
