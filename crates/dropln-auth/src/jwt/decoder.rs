//! Bearer token validation.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use dropln_core::config::{AuthConfig, JwtAlgorithm};
use dropln_core::error::{AppError, ErrorKind};
use dropln_core::result::AppResult;
use dropln_core::traits::identity::IdentityProvider;
use dropln_core::types::OwnerId;

use super::claims::Claims;

/// Validates session tokens issued by the hosted identity provider.
///
/// The `sub` claim is taken as the owner ID.
#[derive(Clone)]
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityProvider")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtIdentityProvider {
    /// Creates a provider from auth configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let (algorithm, decoding_key) = match config.algorithm {
            JwtAlgorithm::Hs256 => {
                if config.jwt_secret.is_empty() {
                    return Err(AppError::configuration(
                        "auth.jwt_secret must be set for HS256",
                    ));
                }
                (
                    Algorithm::HS256,
                    DecodingKey::from_secret(config.jwt_secret.as_bytes()),
                )
            }
            JwtAlgorithm::Rs256 => {
                let key = DecodingKey::from_rsa_pem(config.jwt_public_key_pem.as_bytes())
                    .map_err(|e| {
                        AppError::with_source(
                            ErrorKind::Configuration,
                            "auth.jwt_public_key_pem is not a valid RSA public key",
                            e,
                        )
                    })?;
                (Algorithm::RS256, key)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
            // `iss` is only compared when present unless it is also required.
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Decodes and validates a token string.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::unauthenticated("Invalid token issuer")
                    }
                    _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, token: &str) -> AppResult<OwnerId> {
        let claims = self.decode(token)?;
        let owner = OwnerId::new(claims.sub)?;
        debug!(owner_id = %owner, "Authenticated bearer token");
        Ok(owner)
    }
}
