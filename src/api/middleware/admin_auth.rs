//! Admin authentication
//!
//! Role writes, config updates and key rotation require the configured admin
//! bearer token. When no token is configured the guard lets every request
//! through, which suits deployments fronted by their own auth proxy.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Digest of the admin token; the token itself is not kept in memory
#[derive(Clone, Default)]
pub struct AdminCredentials {
    digest: Option<[u8; 32]>,
}

impl AdminCredentials {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            digest: token.map(digest),
        }
    }

    pub fn is_required(&self) -> bool {
        self.digest.is_some()
    }

    /// Compare the presented token against the configured one by digest
    pub fn verify(&self, presented: &str) -> bool {
        match &self.digest {
            Some(expected) => *expected == digest(presented),
            None => true,
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("required", &self.is_required())
            .finish()
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Extractor guarding admin endpoints
///
/// Expects `Authorization: Bearer <admin token>`.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.admin.is_required() {
            return Ok(RequireAdmin);
        }

        let token = extract_bearer_token(&parts.headers)?;

        if !state.admin.verify(&token) {
            warn!(path = %parts.uri.path(), "Rejected admin request with wrong token");
            return Err(ApiError::forbidden("Invalid admin token"));
        }

        debug!(path = %parts.uri.path(), "Admin access granted");
        Ok(RequireAdmin)
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Admin token required"))?
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .ok_or_else(|| ApiError::unauthorized("Authorization header must use the Bearer scheme"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_open_when_no_token_configured() {
        let credentials = AdminCredentials::new(None);

        assert!(!credentials.is_required());
        assert!(credentials.verify("anything"));
    }

    #[test]
    fn test_verify_configured_token() {
        let credentials = AdminCredentials::new(Some("s3cr3t"));

        assert!(credentials.is_required());
        assert!(credentials.verify("s3cr3t"));
        assert!(!credentials.verify("s3cr3t "));
        assert!(!credentials.verify(""));
    }

    #[test]
    fn test_debug_hides_digest() {
        let credentials = AdminCredentials::new(Some("s3cr3t"));
        assert_eq!(
            format!("{:?}", credentials),
            "AdminCredentials { required: true }"
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  abc "));

        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        let err = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);

        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
