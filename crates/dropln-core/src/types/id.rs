//! Owner identifier issued by the identity provider.
//!
//! Node identifiers are plain [`uuid::Uuid`] values generated by the store.
//! Owner identifiers are opaque strings (for example `user_2bXk...`) that the
//! hosted identity provider hands out, so they are wrapped in a newtype
//! instead. When the `sqlx` feature is enabled the wrapper is stored as a
//! `TEXT` column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Stable identifier of the user that owns a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Create an owner identifier, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::unauthenticated("Owner identifier is empty"));
        }
        Ok(Self(value))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner string value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OwnerId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
