//! ImageKit object store.
//!
//! Uploads go through the multipart upload API, authenticated with the
//! private key as the basic-auth user name and an empty password.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use dropln_core::config::ImageKitConfig;
use dropln_core::error::{AppError, ErrorKind};
use dropln_core::result::AppResult;
use dropln_core::traits::storage::{ObjectStore, StoredObject};

/// Upload API response, only the fields Dropln keeps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_id: String,
    url: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
    file_path: String,
}

/// Object store backed by the ImageKit media service.
#[derive(Debug, Clone)]
pub struct ImageKitObjectStore {
    client: Client,
    private_key: String,
    upload_url: String,
    api_url: String,
}

impl ImageKitObjectStore {
    /// Create a new ImageKit client from configuration.
    pub fn new(config: &ImageKitConfig) -> AppResult<Self> {
        if config.private_key.is_empty() {
            return Err(AppError::configuration(
                "storage.imagekit.private_key must be set when provider is imagekit",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            private_key: config.private_key.clone(),
            upload_url: config.upload_url.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for ImageKitObjectStore {
    fn provider_type(&self) -> &str {
        "imagekit"
    }

    async fn store(&self, data: Bytes, folder: &str, file_name: &str) -> AppResult<StoredObject> {
        let size = data.len();
        let part = Part::bytes(data.to_vec()).file_name(file_name.to_string());
        let form = Form::new()
            .part("file", part)
            .text("fileName", file_name.to_string())
            .text("folder", folder.to_string())
            .text("useUniqueFileName", "false");

        let response = self
            .client
            .post(&self.upload_url)
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "ImageKit upload failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "ImageKit rejected upload");
            return Err(AppError::storage(format!(
                "ImageKit upload failed with status {status}"
            )));
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid ImageKit upload response", e)
        })?;

        debug!(
            file_id = %uploaded.file_id,
            path = %uploaded.file_path,
            bytes = size,
            "Uploaded object to ImageKit"
        );

        Ok(StoredObject {
            url: uploaded.url,
            thumbnail_url: uploaded.thumbnail_url,
            stored_path: uploaded.file_path,
            object_id: uploaded.file_id,
        })
    }

    async fn remove(&self, object_id: &str) -> AppResult<()> {
        let url = format!("{}/files/{object_id}", self.api_url);
        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.private_key, Some(""))
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "ImageKit delete failed", e))?;

        match response.status() {
            s if s.is_success() => {
                debug!(file_id = object_id, "Removed object from ImageKit");
                Ok(())
            }
            StatusCode::NOT_FOUND => Ok(()),
            status => Err(AppError::storage(format!(
                "ImageKit delete failed with status {status}"
            ))),
        }
    }
}
