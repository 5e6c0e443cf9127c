//! Per-user file tree: listing, creation and flag toggles.

pub mod service;

pub use service::TreeService;
