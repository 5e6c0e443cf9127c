//! Core type definitions used across the Dropln workspace.

pub mod id;

pub use id::OwnerId;
