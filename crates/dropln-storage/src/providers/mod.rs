//! Object store provider implementations.

pub mod imagekit;
pub mod local;
pub mod memory;

/// Join a store folder and a file name into an object path.
pub(crate) fn object_path(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        format!("/{file_name}")
    } else if folder.starts_with('/') {
        format!("{folder}/{file_name}")
    } else {
        format!("/{folder}/{file_name}")
    }
}
