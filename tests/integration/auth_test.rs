//! Integration tests for bearer authentication and owner matching.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use helpers::{FilePart, TestApp, field};

const PROTECTED: [(&str, &str); 4] = [
    ("GET", "/api/files"),
    ("GET", "/api/files/starred"),
    ("GET", "/api/files/trash"),
    ("POST", "/api/folders/create"),
];

#[tokio::test]
async fn test_missing_header_is_unauthenticated() {
    let app = TestApp::new();

    for (method, path) in PROTECTED {
        let response = app
            .request(method, path, Some(json!({ "name": "Docs" })), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.error_code(), "UNAUTHENTICATED");
    }
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/files", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_basic_scheme_is_rejected() {
    let app = TestApp::new();
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/api/files")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .expect("request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthenticated() {
    let app = TestApp::new();
    let token = app.token_with_ttl("U1", Duration::minutes(-10));

    let response = app.request("GET", "/api/files", None, Some(token.as_str())).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_is_unauthenticated() {
    let app = TestApp::new();
    let mut other = helpers::test_config();
    other.auth.jwt_secret = "some-other-secret".to_string();
    let token = TestApp::with_config(other).token("U1");

    let response = app.request("GET", "/api/files", None, Some(token.as_str())).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_id_mismatch_is_forbidden() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    let docs_id = field(&docs, "id").to_string();

    let response = app
        .request("GET", "/api/files?userId=U2", None, Some(token.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "UNAUTHORIZED");

    let response = app
        .request(
            "POST",
            "/api/folders/create",
            Some(json!({ "name": "x", "userId": "U2" })),
            Some(token.as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{docs_id}/star"),
            Some(json!({ "userId": "U2" })),
            Some(token.as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .upload(
            &token,
            Some(FilePart {
                file_name: "a.png",
                content_type: "image/png",
                data: b"png",
            }),
            &[("parentId", docs_id.as_str()), ("userId", "U2")],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.objects.store_calls().await, 0);

    let starred = app.request("GET", "/api/files/starred", None, Some(token.as_str())).await;
    assert!(starred.items().is_empty());
}

#[tokio::test]
async fn test_matching_user_id_is_accepted() {
    let app = TestApp::new();
    let token = app.token("U1");

    let response = app
        .request(
            "POST",
            "/api/folders/create",
            Some(json!({ "name": "Docs", "userId": "U1" })),
            Some(token.as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let docs_id = response.body["id"].as_str().unwrap_or_default().to_string();

    let response = app
        .request("GET", "/api/files?userId=U1", None, Some(token.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 1);

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{docs_id}/star"),
            Some(json!({ "userId": "U1" })),
            Some(token.as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isStarred"], true);
}
