//! Integration tests for listing, folder creation and toggles.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, field};

#[tokio::test]
async fn test_health_needs_no_auth() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["objectStore"], "memory");
    assert_eq!(response.body["repository"], true);
}

#[tokio::test]
async fn test_upload_delete_restore_scenario() {
    let app = TestApp::new();
    let token = app.token("U1");

    let docs = app.create_folder(&token, "Docs", None).await;
    assert_eq!(docs["isFolder"], true);
    assert!(docs["parentId"].is_null());
    let docs_id = field(&docs, "id").to_string();

    let file = app.upload_png(&token, &docs_id, "a.png").await;
    let file_id = field(&file, "id").to_string();
    assert_eq!(field(&file, "parentId"), docs_id);

    let listing = format!("/api/files?parentId={docs_id}");
    let response = app.request("GET", &listing, None, Some(token.as_str())).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "id"), file_id);

    let toggle = format!("/api/files/{file_id}/delete");
    let response = app.request("PATCH", &toggle, None, Some(token.as_str())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isDeleted"], true);

    let response = app.request("GET", &listing, None, Some(token.as_str())).await;
    assert!(response.items().is_empty());

    let trash = app.request("GET", "/api/files/trash", None, Some(token.as_str())).await;
    assert_eq!(trash.items().len(), 1);

    let response = app.request("PATCH", &toggle, None, Some(token.as_str())).await;
    assert_eq!(response.body["isDeleted"], false);

    let response = app.request("GET", &listing, None, Some(token.as_str())).await;
    assert_eq!(response.items().len(), 1);
}

#[tokio::test]
async fn test_root_listing_is_scoped_to_owner() {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");

    app.create_folder(&alice, "Photos", None).await;
    app.create_folder(&bob, "Taxes", None).await;

    let response = app.request("GET", "/api/files", None, Some(alice.as_str())).await;
    let items = response.items();
    assert_eq!(items.len(), 1);
    assert!(items.iter().all(|n| field(n, "userId") == "alice"));

    let response = app.request("GET", "/api/files?parentId=", None, Some(bob.as_str())).await;
    let items = response.items();
    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "name"), "Taxes");
}

#[tokio::test]
async fn test_listing_orders_folders_first_then_name() {
    let app = TestApp::new();
    let token = app.token("U1");
    let root = app.create_folder(&token, "root", None).await;
    let root_id = field(&root, "id").to_string();

    app.upload_png(&token, &root_id, "aaa.png").await;
    app.create_folder(&token, "zeta", Some(root_id.as_str())).await;
    app.create_folder(&token, "alpha", Some(root_id.as_str())).await;

    let response = app
        .request("GET", &format!("/api/files?parentId={root_id}"), None, Some(token.as_str()))
        .await;
    let names: Vec<String> = response
        .items()
        .iter()
        .map(|n| field(n, "name").to_string())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta", "aaa.png"]);
}

#[tokio::test]
async fn test_listing_foreign_parent_is_not_found() {
    let app = TestApp::new();
    let theirs = app.create_folder(&app.token("bob"), "Taxes", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/files?parentId={}", field(&theirs, "id")),
            None,
            Some(app.token("alice").as_str()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_create_folder_under_foreign_or_missing_parent() {
    let app = TestApp::new();
    let theirs = app.create_folder(&app.token("bob"), "Taxes", None).await;
    let alice = app.token("alice");

    for parent in [
        field(&theirs, "id").to_string(),
        "00000000-0000-0000-0000-000000000001".to_string(),
    ] {
        let response = app
            .request(
                "POST",
                "/api/folders/create",
                Some(json!({ "name": "sneaky", "parentId": parent })),
                Some(alice.as_str()),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_PARENT");
    }

    let response = app.request("GET", "/api/files", None, Some(alice.as_str())).await;
    assert!(response.items().is_empty());
}

#[tokio::test]
async fn test_create_folder_inside_a_file_is_invalid_parent() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    let file = app.upload_png(&token, field(&docs, "id"), "a.png").await;

    let response = app
        .request(
            "POST",
            "/api/folders/create",
            Some(json!({ "name": "inner", "parentId": field(&file, "id") })),
            Some(token.as_str()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PARENT");
}

#[tokio::test]
async fn test_blank_folder_name_is_invalid_input() {
    let app = TestApp::new();
    let token = app.token("U1");

    for name in ["", "   "] {
        let response = app
            .request(
                "POST",
                "/api/folders/create",
                Some(json!({ "name": name })),
                Some(token.as_str()),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_folder_name_is_trimmed() {
    let app = TestApp::new();
    let folder = app.create_folder(&app.token("U1"), "  Docs  ", None).await;
    assert_eq!(field(&folder, "name"), "Docs");
    assert_eq!(field(&folder, "type"), "folder");
    assert_eq!(folder["size"], 0);
    assert!(field(&folder, "path").starts_with("/folders/U1/"));
}

#[tokio::test]
async fn test_star_toggle_and_starred_view() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    let star = format!("/api/files/{}/star", field(&docs, "id"));

    let response = app.request("PATCH", &star, None, Some(token.as_str())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isStarred"], true);
    assert_eq!(response.body["id"], docs["id"]);
    assert_eq!(response.body["userId"], docs["userId"]);

    let starred = app.request("GET", "/api/files/starred", None, Some(token.as_str())).await;
    assert_eq!(starred.items().len(), 1);

    let response = app.request("PATCH", &star, None, Some(token.as_str())).await;
    assert_eq!(response.body["isStarred"], false);

    let starred = app.request("GET", "/api/files/starred", None, Some(token.as_str())).await;
    assert!(starred.items().is_empty());
}

#[tokio::test]
async fn test_toggles_on_foreign_node_are_not_found() {
    let app = TestApp::new();
    let bob = app.token("bob");
    let theirs = app.create_folder(&bob, "Taxes", None).await;
    let id = field(&theirs, "id");
    let alice = app.token("alice");

    for path in [
        format!("/api/files/{id}/star"),
        format!("/api/files/{id}/delete"),
    ] {
        let response = app.request("PATCH", &path, None, Some(alice.as_str())).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    let response = app
        .request("GET", &format!("/api/files/{id}"), None, Some(alice.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/api/files/{id}"), None, Some(bob.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isStarred"], false);
    assert_eq!(response.body["isDeleted"], false);
}

#[tokio::test]
async fn test_deleting_folder_does_not_cascade() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    let docs_id = field(&docs, "id").to_string();
    let inner = app.create_folder(&token, "Inner", Some(docs_id.as_str())).await;

    let response = app
        .request("PATCH", &format!("/api/files/{docs_id}/delete"), None, Some(token.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let root = app.request("GET", "/api/files", None, Some(token.as_str())).await;
    assert!(root.items().is_empty());

    let response = app
        .request("GET", &format!("/api/files/{}", field(&inner, "id")), None, Some(token.as_str()))
        .await;
    assert_eq!(response.body["isDeleted"], false);
}

#[tokio::test]
async fn test_malformed_ids_are_bad_requests() {
    let app = TestApp::new();
    let token = app.token("U1");

    let response = app
        .request("PATCH", "/api/files/not-a-uuid/star", None, Some(token.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");

    let response = app
        .request("GET", "/api/files?parentId=xyz", None, Some(token.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_node_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request(
            "PATCH",
            "/api/files/00000000-0000-0000-0000-999999999999/delete",
            None,
            Some(app.token("U1").as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_folder_with_malformed_parent_is_invalid_parent() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/folders/create",
            Some(json!({ "name": "x", "parentId": "not-a-uuid" })),
            Some(app.token("U1").as_str()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PARENT");
}

#[tokio::test]
async fn test_create_folder_without_body_is_invalid_input() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/folders/create", None, Some(app.token("U1").as_str()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");
}
