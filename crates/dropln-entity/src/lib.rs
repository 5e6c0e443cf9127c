//! # dropln-entity
//!
//! Domain entity model for Dropln. The only persisted entity is the
//! [`node::Node`], a file or folder row of the `files` table. Constructors
//! on [`node::NewNode`] enforce the invariants that can be checked without
//! looking at other rows.

pub mod node;

pub use node::{DeletionState, NewNode, Node, SupportedType, UploadedFile};
