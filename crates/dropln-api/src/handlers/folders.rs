//! Folder handlers.

use axum::extract::State;
use bytes::Bytes;
use validator::Validate;

use dropln_core::error::AppError;
use dropln_entity::node::Node;

use crate::dto::request::CreateFolderRequest;
use crate::dto::response::Created;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders/create
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> Result<Created<Node>, ApiError> {
    let req = CreateFolderRequest::from_body(&body)?;
    auth.ensure_same_owner(req.user_id.as_deref())?;
    req.validate()
        .map_err(|e| AppError::invalid_input(format!("Validation failed: {e}")))?;
    let parent_id = req.parent_id()?;

    let folder = state
        .tree_service
        .create_folder(&auth, &req.name, parent_id)
        .await?;

    Ok(Created(folder))
}
