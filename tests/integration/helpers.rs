//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use dropln_api::{AppState, build_app};
use dropln_auth::jwt::{JwtEncoder, JwtIdentityProvider};
use dropln_core::config::{AppConfig, ObjectStoreKind};
use dropln_core::types::OwnerId;
use dropln_database::repositories::MemoryNodeRepository;
use dropln_storage::MemoryObjectStore;

/// Multipart boundary used by [`TestApp::upload`].
const BOUNDARY: &str = "dropln-test-boundary-7MA4YWxkTrZu0gW";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Node repository behind the router
    pub nodes: MemoryNodeRepository,
    /// Object store behind the router
    pub objects: MemoryObjectStore,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

/// Configuration used by every integration test.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.storage.provider = ObjectStoreKind::Memory;
    config
}

/// A file part for [`TestApp::upload`].
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

impl TestApp {
    /// Create a new test application backed by in-memory collaborators
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let nodes = MemoryNodeRepository::new();
        let objects = MemoryObjectStore::new();
        let identity =
            Arc::new(JwtIdentityProvider::new(&config.auth).expect("Failed to build identity"));
        let encoder = JwtEncoder::new(&config.auth).expect("Failed to build encoder");

        let state = AppState::new(
            config.clone(),
            Arc::new(nodes.clone()),
            Arc::new(objects.clone()),
            identity,
        );

        Self {
            router: build_app(state),
            nodes,
            objects,
            config,
            encoder,
        }
    }

    /// Mint a bearer token for an owner
    pub fn token(&self, owner: &str) -> String {
        self.token_with_ttl(owner, Duration::minutes(10))
    }

    /// Mint a bearer token with an explicit lifetime
    pub fn token_with_ttl(&self, owner: &str, ttl: Duration) -> String {
        let owner = OwnerId::new(owner).expect("valid owner");
        self.encoder.issue(&owner, ttl).expect("Failed to issue token")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a multipart upload to `/api/files/upload`
    pub async fn upload(
        &self,
        token: &str,
        file: Option<FilePart<'_>>,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }

        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.file_name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.data);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a folder and return its JSON representation
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> Value {
        let response = self
            .request(
                "POST",
                "/api/folders/create",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    /// Upload a small PNG into a folder and return its JSON representation
    pub async fn upload_png(&self, token: &str, parent_id: &str, name: &str) -> Value {
        let response = self
            .upload(
                token,
                Some(FilePart {
                    file_name: name,
                    content_type: "image/png",
                    data: &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
                }),
                &[("parentId", parent_id)],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        if status.is_success() {
            assert!(
                body.get("success").is_none() && body.get("data").is_none(),
                "success bodies are bare resources: {body}"
            );
        }

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The nodes of a list response, which is a bare JSON array
    pub fn items(&self) -> Vec<Value> {
        self.body
            .as_array()
            .cloned()
            .unwrap_or_else(|| panic!("expected a JSON array, got {}", self.body))
    }

    /// The `error` code of an error response
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Extract a string field from a node JSON value
pub fn field<'a>(node: &'a Value, key: &str) -> &'a str {
    node[key].as_str().unwrap_or_default()
}
