//! Allowed file types.

use serde::{Deserialize, Serialize};

use dropln_core::error::AppError;
use dropln_core::result::AppResult;

/// Category of an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedType {
    /// Any `image/*` type.
    Image,
    /// `application/pdf`.
    Pdf,
}

impl SupportedType {
    /// Classify a MIME type, rejecting everything except images and PDFs.
    pub fn classify(mime_type: &str) -> AppResult<Self> {
        let normalized = mime_type.trim().to_ascii_lowercase();
        if normalized.starts_with("image/") && normalized.len() > "image/".len() {
            Ok(Self::Image)
        } else if normalized == "application/pdf" {
            Ok(Self::Pdf)
        } else {
            Err(AppError::unsupported_type(format!(
                "Only images and PDFs are supported, got '{mime_type}'"
            )))
        }
    }
}
