//! Object store configuration.

use serde::{Deserialize, Serialize};

/// Which object store implementation backs file uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectStoreKind {
    /// ImageKit media service.
    Imagekit,
    /// Local directory served under a public base URL.
    Local,
    /// In-process store, contents are lost on restart.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Object store implementation.
    #[serde(default = "default_provider")]
    pub provider: ObjectStoreKind,
    /// Maximum upload size in bytes (default 25 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Root folder inside the object store that all uploads go under.
    #[serde(default = "default_root_folder")]
    pub root_folder: String,
    /// ImageKit settings.
    #[serde(default)]
    pub imagekit: ImageKitConfig,
    /// Local directory settings.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_upload_size_bytes: default_max_upload(),
            root_folder: default_root_folder(),
            imagekit: ImageKitConfig::default(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// ImageKit upload API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageKitConfig {
    /// Public API key.
    #[serde(default)]
    pub public_key: String,
    /// Private API key, used as the basic-auth user name.
    #[serde(default)]
    pub private_key: String,
    /// URL endpoint files are delivered from.
    #[serde(default)]
    pub url_endpoint: String,
    /// Upload API URL.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
    /// File management API base URL (used for deletes).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ImageKitConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            url_endpoint: String::new(),
            upload_url: default_upload_url(),
            api_url: default_api_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Local filesystem object store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for stored objects.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL the root path is served from.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_provider() -> ObjectStoreKind {
    ObjectStoreKind::Local
}

fn default_max_upload() -> u64 {
    26_214_400 // 25 MB
}

fn default_root_folder() -> String {
    "/dropln".to_string()
}

fn default_upload_url() -> String {
    "https://upload.imagekit.io/api/v1/files/upload".to_string()
}

fn default_api_url() -> String {
    "https://api.imagekit.io/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_local_root() -> String {
    "./data/objects".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000/objects".to_string()
}
