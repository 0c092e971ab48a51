mod common;

use serde_json::Value;

fn ids(body: &Value, field: &str) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| match &item[field] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

#[tokio::test]
async fn faqs_unfiltered_lists_featured_first() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server.get("/api/v1/faqs").await.json();
    assert_eq!(body["total"], 12);
    assert_eq!(body["count"], 12);
    // Featured 1, 3, 7 by order, then the rest by order (stable).
    assert_eq!(&ids(&body, "id")[..3], &["1", "3", "7"]);

    let tags: Vec<&str> = body["available_tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    let mut sorted = tags.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(tags, sorted);
}

#[tokio::test]
async fn faqs_filter_by_category() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/faqs")
        .add_query_param("category", "payment")
        .await
        .json();
    assert_eq!(body["total"], 12);
    assert_eq!(ids(&body, "id"), vec!["3", "4", "12"]);
}

#[tokio::test]
async fn faqs_tags_match_any_selected() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/faqs")
        .add_query_param("tags", "fees,jobs")
        .await
        .json();
    assert_eq!(ids(&body, "id"), vec!["3", "7", "4", "8"]);
}

#[tokio::test]
async fn faqs_search_is_trimmed_and_case_insensitive() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/faqs")
        .add_query_param("q", "  LAPTOP ")
        .await
        .json();
    assert_eq!(ids(&body, "id"), vec!["1", "11"]);

    let body: Value = server
        .get("/api/v1/faqs")
        .add_query_param("q", "   ")
        .await
        .json();
    assert_eq!(body["count"], 12);
}

#[tokio::test]
async fn faqs_unknown_tags_are_dropped() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/faqs")
        .add_query_param("tags", "no-such-tag")
        .await
        .json();
    assert_eq!(body["count"], 12);
}

#[tokio::test]
async fn faqs_unknown_category_is_bad_request() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .get("/api/v1/faqs")
        .add_query_param("category", "astrology")
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("astrology"));
}

#[tokio::test]
async fn programs_filter_and_sort() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/programs")
        .add_query_param("level", "beginner")
        .add_query_param("sort", "price-low-high")
        .await
        .json();
    assert_eq!(
        ids(&body, "id"),
        vec!["ui-ux-design", "data-analytics-python", "full-stack-web"]
    );

    let body: Value = server
        .get("/api/v1/programs")
        .add_query_param("format", "in-person")
        .add_query_param("tags", "weekend")
        .await
        .json();
    assert_eq!(
        ids(&body, "id"),
        vec!["mobile-flutter", "network-fundamentals"]
    );
}

#[tokio::test]
async fn programs_default_sort_is_featured_first() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server.get("/api/v1/programs").await.json();
    assert_eq!(
        &ids(&body, "id")[..2],
        &["full-stack-web", "mobile-flutter"]
    );
}

#[tokio::test]
async fn programs_unknown_level_is_bad_request() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server
        .get("/api/v1/programs")
        .add_query_param("level", "wizard")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn program_detail_links_instructor_and_stories() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server.get("/api/v1/programs/full-stack-web").await.json();
    assert_eq!(body["program"]["id"], "full-stack-web");
    assert!(body["instructor"].is_object());
    for story in body["testimonials"].as_array().unwrap() {
        assert_eq!(story["program_id"], "full-stack-web");
    }
}

#[tokio::test]
async fn missing_program_is_not_found() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server
        .get("/api/v1/programs/underwater-basket-weaving")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn blog_is_newest_first() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server.get("/api/v1/blog").await.json();
    assert_eq!(
        ids(&body, "slug"),
        vec![
            "new-intake-2025",
            "tech-jobs-cambodia",
            "first-react-component",
            "hackathon-recap"
        ]
    );
}

#[tokio::test]
async fn blog_filters_by_category() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/blog")
        .add_query_param("category", "tutorials")
        .await
        .json();
    assert_eq!(body["total"], 4);
    assert_eq!(ids(&body, "slug"), vec!["first-react-component"]);
}

#[tokio::test]
async fn blog_post_renders_sanitized_html_per_language() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server
        .get("/api/v1/blog/first-react-component")
        .add_query_param("lang", "km")
        .await
        .json();
    assert_eq!(body["lang"], "km");
    let html = body["html"].as_str().unwrap();
    assert!(html.contains("<p>"));
    assert!(!html.contains("<script"));
}

#[tokio::test]
async fn blog_post_unsupported_language_is_bad_request() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server
        .get("/api/v1/blog/first-react-component")
        .add_query_param("lang", "fr")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn gallery_filters_by_category() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let items: Vec<Value> = server
        .get("/api/v1/gallery")
        .add_query_param("category", "events")
        .await
        .json();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["category"] == "events"));

    let all: Vec<Value> = server.get("/api/v1/gallery").await.json();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn testimonials_featured_filter() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let featured: Vec<Value> = server
        .get("/api/v1/testimonials")
        .add_query_param("featured", "true")
        .await
        .json();
    assert!(!featured.is_empty());
    assert!(featured.iter().all(|t| t["featured"] == true));

    let instructors: Vec<Value> = server.get("/api/v1/instructors").await.json();
    assert_eq!(instructors.len(), 4);
}
