//! JWT Issuer
//!
//! Issues short-lived JWTs whose claims are shaped by named roles and a
//! process-wide issuer policy:
//! - Role templates with fixed claims and subject/audience restrictions
//! - Claim merging with reserved-claim protection and allow-listing
//! - RS256 signing keys with rotation and a retention window
//! - A JWKS endpoint for verifiers

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AppConfig;

use std::sync::Arc;

use chrono::Duration;

use api::middleware::AdminCredentials;
use api::state::AppState;
use domain::{DomainError, IssuerConfig, KeyGenerator, Role, SigningKey};
use infrastructure::{
    auth::{JwksPublisher, TokenSigner},
    clock::{Clock, SystemClock},
    config::StorageConfigRepository,
    keys::{KeyManager, KeyManagerConfig, RsaKeyGenerator, StorageSigningKeyRepository},
    role::StorageRoleRepository,
    services::{ConfigService, RoleService, TokenService, TokenServiceDeps},
    storage::InMemoryStorage,
    token_id::{TokenIdGenerator, UuidTokenIds},
};

/// Create the application state for production use
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let generator = RsaKeyGenerator::new(config.keys.rsa_bits)?;

    Ok(build_app_state(
        config,
        Arc::new(generator),
        Arc::new(SystemClock),
        Arc::new(UuidTokenIds),
    )?)
}

/// Wire storages, repositories and services around the given key
/// generator, clock and `jti` source
pub fn build_app_state(
    config: &AppConfig,
    generator: Arc<dyn KeyGenerator>,
    clock: Arc<dyn Clock>,
    token_ids: Arc<dyn TokenIdGenerator>,
) -> Result<AppState, DomainError> {
    let role_repository = Arc::new(StorageRoleRepository::new(Arc::new(
        InMemoryStorage::<Role>::new(),
    )));
    let config_repository = Arc::new(StorageConfigRepository::new(Arc::new(
        InMemoryStorage::<IssuerConfig>::new(),
    )));
    let key_repository = Arc::new(StorageSigningKeyRepository::new(Arc::new(
        InMemoryStorage::<SigningKey>::new(),
    )));

    let keys = Arc::new(KeyManager::new(
        key_repository,
        generator,
        clock.clone(),
        key_manager_config(config)?,
    ));
    let signer = Arc::new(TokenSigner::new(keys.clone()));

    let tokens = TokenService::new(TokenServiceDeps {
        roles: role_repository.clone(),
        config: config_repository.clone(),
        signer,
        clock,
        token_ids,
    });

    Ok(AppState {
        tokens: Arc::new(tokens),
        roles: Arc::new(RoleService::new(role_repository, config_repository.clone())),
        config: Arc::new(ConfigService::new(config_repository)),
        jwks: Arc::new(JwksPublisher::new(keys.clone())),
        keys,
        admin: AdminCredentials::new(config.auth.admin_token.as_deref()),
    })
}

fn key_manager_config(config: &AppConfig) -> Result<KeyManagerConfig, DomainError> {
    let rotation_period = match config.keys.rotation_period_secs {
        0 => None,
        secs => Some(key_duration("rotation_period_secs", secs)?),
    };

    Ok(KeyManagerConfig {
        rotation_period,
        retention: key_duration("retention_secs", config.keys.retention_secs)?,
    })
}

fn key_duration(field: &str, secs: u64) -> Result<Duration, DomainError> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| DomainError::configuration(format!("keys.{} out of range: {}", field, secs)))
}
