//! File listing, upload and toggle handlers.

use axum::extract::multipart::MultipartError;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use dropln_core::error::AppError;
use dropln_entity::node::{Node, UploadedFile};

use crate::dto::request::{ListFilesQuery, OwnerScope, parse_optional_uuid};
use crate::dto::response::Created;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// MIME type assumed when the file part carries none.
const UNKNOWN_MIME: &str = "application/octet-stream";

type NodeResponse = Json<Node>;
type NodeListResponse = Json<Vec<Node>>;

/// Parses a node ID from a path segment.
fn parse_node_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid file id: {raw}")))
}

/// GET /api/files?parentId=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<NodeListResponse, ApiError> {
    auth.ensure_same_owner(query.user_id.as_deref())?;
    let parent_id = query.parent_id()?;

    let nodes = state.tree_service.list_children(&auth, parent_id).await?;
    Ok(Json(nodes))
}

/// GET /api/files/starred
pub async fn list_starred(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<NodeListResponse, ApiError> {
    let nodes = state.tree_service.list_starred(&auth).await?;
    Ok(Json(nodes))
}

/// GET /api/files/trash
pub async fn list_trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<NodeListResponse, ApiError> {
    let nodes = state.tree_service.list_trash(&auth).await?;
    Ok(Json(nodes))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<NodeResponse, ApiError> {
    let node = state
        .tree_service
        .get_node(&auth, parse_node_id(&id)?)
        .await?;
    Ok(Json(node))
}

/// PATCH /api/files/{id}/star
pub async fn toggle_star(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<NodeResponse, ApiError> {
    auth.ensure_same_owner(OwnerScope::from_body(&body)?.user_id.as_deref())?;
    let node = state
        .tree_service
        .toggle_star(&auth, parse_node_id(&id)?)
        .await?;
    Ok(Json(node))
}

/// PATCH /api/files/{id}/delete
pub async fn toggle_deleted(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<NodeResponse, ApiError> {
    auth.ensure_same_owner(OwnerScope::from_body(&body)?.user_id.as_deref())?;
    let node = state
        .tree_service
        .toggle_deleted(&auth, parse_node_id(&id)?)
        .await?;
    Ok(Json(node))
}

/// Fields collected from the upload form.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(UploadedFile, Bytes)>,
    parent_id: Option<String>,
    user_id: Option<String>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Upload exceeds the configured size limit")
    } else {
        AppError::invalid_input(format!("Multipart error: {}", e.body_text()))
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::invalid_input("File name is required"))?;
                let mime_type = field.content_type().unwrap_or(UNKNOWN_MIME).to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                let upload = UploadedFile {
                    name: file_name,
                    mime_type,
                    size: data.len() as i64,
                };
                form.file = Some((upload, data));
            }
            "parentId" => form.parent_id = Some(field.text().await.map_err(multipart_error)?),
            "userId" => form.user_id = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/files/upload: multipart form with `file`, `parentId` and
/// optionally `userId`
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Created<Node>, ApiError> {
    let form = read_upload_form(multipart).await?;

    auth.ensure_same_owner(form.user_id.as_deref())?;
    let (upload, data) = form
        .file
        .ok_or_else(|| AppError::invalid_input("file is required"))?;
    let parent_id = parse_optional_uuid(form.parent_id.as_deref(), "parentId")
        .map_err(|_| AppError::invalid_parent("Invalid parent folder"))?;

    let file = state
        .tree_service
        .create_file(&auth, parent_id, upload, data)
        .await?;

    Ok(Created(file))
}
