//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_core::traits::storage::StoredObject;
use dropln_core::types::OwnerId;

use super::mime::SupportedType;
use super::state::DeletionState;

/// Value of the `type` column for folders.
pub const FOLDER_TYPE: &str = "folder";

/// A file or folder owned by a single user.
///
/// Serialized with camelCase keys, which is the shape the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique node identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Informational location string.
    pub path: String,
    /// Size in bytes (0 for folders).
    pub size: i64,
    /// MIME type for files, `"folder"` for folders.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub node_type: String,
    /// Object store URL (empty for folders).
    pub file_url: String,
    /// Thumbnail URL, if the object store produced one.
    pub thumbnail_url: Option<String>,
    /// The owner.
    pub user_id: OwnerId,
    /// Containing folder (None for root-level nodes).
    pub parent_id: Option<Uuid>,
    /// Whether this node is a folder.
    pub is_folder: bool,
    /// Whether the owner starred this node.
    pub is_starred: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Check if this node sits at the root of its owner's forest.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Current soft-delete state.
    pub fn deletion_state(&self) -> DeletionState {
        DeletionState::from_flag(self.is_deleted)
    }

    /// Check whether `owner` owns this node.
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.user_id == owner
    }
}

/// Data required to insert a new node.
///
/// Only obtainable through [`NewNode::folder`] and [`NewNode::file`], so
/// every instance has already passed name, size and type validation. The
/// parent's existence and ownership are checked by the tree service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNode {
    /// Pre-generated identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Informational location string.
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type or `"folder"`.
    pub node_type: String,
    /// Object store URL.
    pub file_url: String,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// The owner.
    pub user_id: OwnerId,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
    /// Whether this node is a folder.
    pub is_folder: bool,
}

/// Metadata of an uploaded file, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name.
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
}

impl UploadedFile {
    /// Validate the name, size and type of an upload.
    pub fn validate(&self) -> AppResult<SupportedType> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("File name cannot be empty"));
        }
        if self.size < 0 {
            return Err(AppError::invalid_input("File size cannot be negative"));
        }
        SupportedType::classify(&self.mime_type)
    }

    /// Name under which the binary is stored: a fresh UUID plus the
    /// original extension, if there is one.
    pub fn storage_name(&self) -> String {
        match extension_of(&self.name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        }
    }
}

impl NewNode {
    /// Build a folder record. The name is trimmed and must not be empty.
    pub fn folder(owner: OwnerId, name: &str, parent_id: Option<Uuid>) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Folder name cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            path: format!("/folders/{}/{}", owner, Uuid::new_v4()),
            size: 0,
            node_type: FOLDER_TYPE.to_string(),
            file_url: String::new(),
            thumbnail_url: None,
            user_id: owner,
            parent_id,
            is_folder: true,
        })
    }

    /// Build a file record from an upload and what the object store returned.
    pub fn file(
        owner: OwnerId,
        parent_id: Uuid,
        upload: &UploadedFile,
        stored: &StoredObject,
    ) -> AppResult<Self> {
        upload.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: upload.name.clone(),
            path: stored.stored_path.clone(),
            size: upload.size,
            node_type: upload.mime_type.clone(),
            file_url: stored.url.clone(),
            thumbnail_url: stored.thumbnail_url.clone(),
            user_id: owner,
            parent_id: Some(parent_id),
            is_folder: false,
        })
    }

    /// Materialize the row as it looks right after insertion.
    pub fn into_node(self, now: DateTime<Utc>) -> Node {
        Node {
            id: self.id,
            name: self.name,
            path: self.path,
            size: self.size,
            node_type: self.node_type,
            file_url: self.file_url,
            thumbnail_url: self.thumbnail_url,
            user_id: self.user_id,
            parent_id: self.parent_id,
            is_folder: self.is_folder,
            is_starred: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}
