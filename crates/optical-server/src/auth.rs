//! Bearer-token guard for the routes that need one.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::{error::ApiError, state::AppState};

/// SHA-256 of the configured token. Requests are checked digest against
/// digest so the comparison never looks at the raw secret.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenDigest([u8; 32]);

impl TokenDigest {
    pub fn of(token: &str) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(token.as_bytes()));
        Self(bytes)
    }

    /// `None` when the configured token is empty, which turns the guard off.
    pub fn from_config(token: &str) -> Option<Self> {
        if token.is_empty() {
            warn!("OPTICAL_API_TOKEN is empty, bearer guard disabled");
            return None;
        }
        let digest = Self::of(token);
        info!(fingerprint = %digest.fingerprint(), "Bearer guard enabled");
        Some(digest)
    }

    /// Short hex prefix, safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

/// Proof that the request carried the configured bearer token.
pub struct Authorized;

impl FromRequestParts<Arc<AppState>> for Authorized {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = &state.token else {
            return Ok(Authorized);
        };

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            warn!(path = %parts.uri.path(), "Missing bearer token");
            return Err(ApiError::Unauthorized);
        };

        let presented = TokenDigest::of(token);
        if presented != *expected {
            warn!(
                path = %parts.uri.path(),
                fingerprint = %presented.fingerprint(),
                "Rejected bearer token"
            );
            return Err(ApiError::Forbidden);
        }

        Ok(Authorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_matches_only_same_token() {
        assert!(TokenDigest::of("mysecrettoken") == TokenDigest::of("mysecrettoken"));
        assert!(TokenDigest::of("mysecrettoken") != TokenDigest::of("mysecrettoken "));
    }

    #[test]
    fn test_empty_token_disables_guard() {
        assert!(TokenDigest::from_config("").is_none());
        assert!(TokenDigest::from_config("abc").is_some());
    }

    #[test]
    fn test_fingerprint_is_short_hex() {
        let fingerprint = TokenDigest::of("mysecrettoken").fingerprint();
        assert_eq!(fingerprint.len(), 8);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
