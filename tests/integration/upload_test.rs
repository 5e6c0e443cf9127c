//! Integration tests for multipart file uploads.

mod helpers;

use axum::http::StatusCode;

use helpers::{FilePart, TestApp, field, test_config};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn png(name: &str) -> FilePart<'_> {
    FilePart {
        file_name: name,
        content_type: "image/png",
        data: PNG,
    }
}

#[tokio::test]
async fn test_png_upload_creates_file_node() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    let docs_id = field(&docs, "id").to_string();

    let response = app
        .upload(&token, Some(png("a.png")), &[("parentId", docs_id.as_str())])
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let file = &response.body;
    assert_eq!(file["isFolder"], false);
    assert_eq!(field(file, "name"), "a.png");
    assert_eq!(field(file, "type"), "image/png");
    assert_eq!(file["size"], PNG.len());
    assert_eq!(field(file, "parentId"), docs_id);
    assert_eq!(field(file, "userId"), "U1");

    let url = field(file, "fileUrl");
    let prefix = format!("memory://objects/dropln/U1/folder/{docs_id}/");
    assert!(url.starts_with(&prefix), "{url}");
    assert!(url.ends_with(".png"), "{url}");
    assert!(!url.ends_with("/a.png"));

    let path = field(file, "path");
    assert_eq!(app.objects.get(path).await.as_deref(), Some(PNG));
    assert_eq!(app.nodes.len().await, 2);
}

#[tokio::test]
async fn test_pdf_upload_is_accepted() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(
            &token,
            Some(FilePart {
                file_name: "scan.pdf",
                content_type: "application/pdf",
                data: b"%PDF-1.7",
            }),
            &[("parentId", field(&docs, "id"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["type"], "application/pdf");
    assert!(field(&response.body, "fileUrl").ends_with(".pdf"));
}

#[tokio::test]
async fn test_unsupported_type_never_reaches_store() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(
            &token,
            Some(FilePart {
                file_name: "notes.txt",
                content_type: "text/plain",
                data: b"hello",
            }),
            &[("parentId", field(&docs, "id"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.error_code(), "UNSUPPORTED_TYPE");
    assert_eq!(app.objects.store_calls().await, 0);
}

#[tokio::test]
async fn test_missing_parent_is_invalid_parent() {
    let app = TestApp::new();
    let token = app.token("U1");

    for fields in [vec![], vec![("parentId", "")], vec![("parentId", "nope")]] {
        let response = app.upload(&token, Some(png("a.png")), &fields).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_PARENT");
    }
    assert_eq!(app.objects.store_calls().await, 0);
}

#[tokio::test]
async fn test_foreign_parent_is_invalid_parent() {
    let app = TestApp::new();
    let theirs = app.create_folder(&app.token("bob"), "Taxes", None).await;

    let response = app
        .upload(
            &app.token("alice"),
            Some(png("a.png")),
            &[("parentId", field(&theirs, "id"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PARENT");
    assert_eq!(app.objects.store_calls().await, 0);
}

#[tokio::test]
async fn test_foreign_parent_is_reported_before_file_type() {
    let app = TestApp::new();
    let theirs = app.create_folder(&app.token("bob"), "Taxes", None).await;

    let response = app
        .upload(
            &app.token("alice"),
            Some(FilePart {
                file_name: "notes.txt",
                content_type: "text/plain",
                data: b"hello",
            }),
            &[("parentId", field(&theirs, "id"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PARENT");
    assert_eq!(app.objects.store_calls().await, 0);
}

#[tokio::test]
async fn test_missing_file_part_is_invalid_input() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(&token, None, &[("parentId", field(&docs, "id"))])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");
}

#[tokio::test]
async fn test_oversize_upload_is_rejected() {
    let mut config = test_config();
    config.storage.max_upload_size_bytes = 16;
    let app = TestApp::with_config(config);
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(
            &token,
            Some(FilePart {
                file_name: "big.png",
                content_type: "image/png",
                data: &[0u8; 64],
            }),
            &[("parentId", field(&docs, "id"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.objects.store_calls().await, 0);
}

#[tokio::test]
async fn test_store_failure_leaves_no_node() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    app.objects.set_fail_store(true);

    let response = app
        .upload(&token, Some(png("a.png")), &[("parentId", field(&docs, "id"))])
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), "INTERNAL");
    assert_eq!(response.body["message"], "Internal server error");
    assert_eq!(app.nodes.len().await, 1);
}

#[tokio::test]
async fn test_insert_failure_removes_stored_object() {
    let app = TestApp::new();
    let token = app.token("U1");
    let docs = app.create_folder(&token, "Docs", None).await;
    app.nodes.set_fail_inserts(true);

    let response = app
        .upload(&token, Some(png("a.png")), &[("parentId", field(&docs, "id"))])
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.objects.store_calls().await, 1);
    assert_eq!(app.objects.removed().await.len(), 1);
    assert_eq!(app.objects.object_count().await, 0);
}
