//! Owner visibility rules.
//!
//! A node owned by someone else is indistinguishable from a node that does
//! not exist: callers get `NotFound`, or `InvalidParent` when the node was
//! named as a parent.

use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_core::types::OwnerId;
use dropln_entity::node::Node;

/// Fail with `NotFound` unless `owner` owns `node`.
pub fn assert_owns(owner: &OwnerId, node: &Node) -> AppResult<()> {
    if node.is_owned_by(owner) {
        Ok(())
    } else {
        Err(AppError::not_found("File not found"))
    }
}

/// Turn a lookup result into an owned node, or `NotFound`.
pub fn require_owned(owner: &OwnerId, node: Option<Node>) -> AppResult<Node> {
    let node = node.ok_or_else(|| AppError::not_found("File not found"))?;
    assert_owns(owner, &node)?;
    Ok(node)
}

/// Check that a looked-up parent is a folder owned by `owner`.
///
/// Missing, foreign and non-folder parents all yield `InvalidParent`.
pub fn resolve_parent_folder(owner: &OwnerId, parent: Option<Node>) -> AppResult<Node> {
    let parent = require_owned(owner, parent)
        .map_err(|_| AppError::invalid_parent("Invalid parent folder"))?;
    if !parent.is_folder {
        return Err(AppError::invalid_parent("Invalid parent folder"));
    }
    Ok(parent)
}
