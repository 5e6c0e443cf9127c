//! Convenience result type alias for Dropln.

use crate::error::AppError;

/// A specialized `Result` type for Dropln operations.
pub type AppResult<T> = Result<T, AppError>;
