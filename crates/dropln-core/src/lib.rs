//! # dropln-core
//!
//! Core crate for Dropln. Contains the collaborator traits (object store,
//! identity provider), configuration schemas, the owner identifier type,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dropln crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::OwnerId;
