//! HTTP request handlers.

pub mod files;
pub mod folders;
pub mod health;
