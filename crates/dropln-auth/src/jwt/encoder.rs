//! Token minting for development and tests.
//!
//! Production tokens come from the hosted identity provider. This encoder
//! signs tokens with the same HS256 secret so a local server can be driven
//! without it.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use dropln_core::config::{AuthConfig, JwtAlgorithm};
use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_core::types::OwnerId;

use super::claims::Claims;

/// Creates signed HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: Option<String>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates an encoder from auth configuration. Only HS256 is supported.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.algorithm != JwtAlgorithm::Hs256 {
            return Err(AppError::configuration(
                "Token minting requires auth.algorithm = HS256",
            ));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: (!config.issuer.is_empty()).then(|| config.issuer.clone()),
        })
    }

    /// Issues a token for `owner` valid for `ttl` from now.
    pub fn issue(&self, owner: &OwnerId, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::invalid_input("Token lifetime is out of range"))?;
        let claims = Claims {
            sub: owner.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            sid: None,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
