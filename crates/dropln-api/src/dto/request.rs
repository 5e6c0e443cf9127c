//! Request DTOs with validation.
//!
//! Every request may repeat the caller's owner ID as `userId`. When present
//! it must match the authenticated owner.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dropln_core::error::AppError;

/// Query string of `GET /api/files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Folder to list; the root level when absent or empty.
    pub parent_id: Option<String>,
    /// Redundant owner ID.
    pub user_id: Option<String>,
}

impl ListFilesQuery {
    /// Parse the parent ID, treating an empty value as the root level.
    pub fn parent_id(&self) -> Result<Option<Uuid>, AppError> {
        parse_optional_uuid(self.parent_id.as_deref(), "parentId")
    }
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1 to 255 characters"))]
    pub name: String,
    /// Parent folder ID (None for root-level).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Redundant owner ID.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl CreateFolderRequest {
    /// Parse a JSON body.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))
    }

    /// Parse the parent ID. A malformed value cannot name an owned folder.
    pub fn parent_id(&self) -> Result<Option<Uuid>, AppError> {
        parse_optional_uuid(self.parent_id.as_deref(), "parentId")
            .map_err(|_| AppError::invalid_parent("Invalid parent folder"))
    }
}

/// Optional JSON body of the toggle endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerScope {
    /// Redundant owner ID.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl OwnerScope {
    /// Parse a possibly empty JSON body.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))
    }
}

/// Parse an optional UUID field where an empty string means absent.
pub fn parse_optional_uuid(value: Option<&str>, field: &str) -> Result<Option<Uuid>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| AppError::invalid_input(format!("Invalid {field}: {raw}"))),
    }
}
