//! Token service - The sign request flow
//!
//! Loads the role and the issuer config, merges them with the requested
//! claims and hands the result to the signer. Nothing is signed unless the
//! merge succeeds.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::domain::{merge_claims, ConfigRepository, DomainError, RoleName, RoleRepository};
use crate::infrastructure::auth::{SignedToken, TokenSigner};
use crate::infrastructure::clock::Clock;
use crate::infrastructure::observability::{record_sign_rejected, record_token_issued};
use crate::infrastructure::token_id::TokenIdGenerator;

/// Collaborators of the sign flow
#[derive(Debug, Clone)]
pub struct TokenServiceDeps {
    pub roles: Arc<dyn RoleRepository>,
    pub config: Arc<dyn ConfigRepository>,
    pub signer: Arc<TokenSigner>,
    pub clock: Arc<dyn Clock>,
    pub token_ids: Arc<dyn TokenIdGenerator>,
}

#[derive(Debug)]
pub struct TokenService {
    deps: TokenServiceDeps,
}

impl TokenService {
    pub fn new(deps: TokenServiceDeps) -> Self {
        Self { deps }
    }

    /// Issue a token under `role` carrying the requested claims
    pub async fn sign(
        &self,
        role: &str,
        claims: Map<String, Value>,
    ) -> Result<SignedToken, DomainError> {
        let role_name = RoleName::new(role)
            .map_err(|_| DomainError::not_found(format!("Role '{}' not found", role)))?;

        let role = self
            .deps
            .roles
            .get(&role_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Role '{}' not found", role_name)))?;

        let config = self.deps.config.get().await?;
        let now = self.deps.clock.now();

        let merged = merge_claims(&role, &config, &claims, now, || self.deps.token_ids.next_id())
            .map_err(|e| {
                warn!(role = %role_name, reason = e.reason(), error = %e, "Sign request rejected");
                record_sign_rejected(e.reason());
                DomainError::from(e)
            })?;

        let signed = self.deps.signer.sign(&merged).await?;

        record_token_issued(role_name.as_str());
        info!(
            role = %role_name,
            kid = %signed.key_id,
            jti = merged.token_id().unwrap_or_default(),
            "Issued token"
        );

        Ok(signed)
    }
}
