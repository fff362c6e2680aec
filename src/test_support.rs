//! Shared fixtures for unit tests

use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{create_router_with_state, AppState};
use crate::config::AppConfig;
use crate::domain::signing_key::{GeneratedKeyPair, KeyGenerator};
use crate::domain::{ClaimSet, ConfigUpdate, DomainError, RoleWriteRequest, SigningKey};
use crate::infrastructure::clock::{Clock, SystemClock};
use crate::infrastructure::keys::{
    key_pair_from_private, KeyManager, KeyManagerConfig, StorageSigningKeyRepository,
};
use crate::infrastructure::storage::InMemoryStorage;
use crate::infrastructure::token_id::SequentialTokenIds;

const POOL_SIZE: usize = 3;

static KEY_POOL: Lazy<Vec<GeneratedKeyPair>> = Lazy::new(|| {
    (0..POOL_SIZE)
        .map(|_| {
            let private_key = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
            key_pair_from_private(&private_key).unwrap()
        })
        .collect()
});

/// One of a handful of RSA pairs generated once per test process
pub fn pooled_key_pair(index: usize) -> GeneratedKeyPair {
    KEY_POOL[index % POOL_SIZE].clone()
}

/// Key generator that hands out the pooled pairs round-robin
#[derive(Debug, Default)]
pub struct PooledKeyGenerator {
    next: AtomicUsize,
}

impl PooledKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyGenerator for PooledKeyGenerator {
    async fn generate(&self) -> Result<GeneratedKeyPair, DomainError> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(pooled_key_pair(index))
    }
}

/// Key manager over fresh in-memory storage, rotating only on request
pub fn key_manager() -> Arc<KeyManager> {
    key_manager_with(
        Arc::new(SystemClock),
        KeyManagerConfig {
            rotation_period: None,
            retention: Duration::seconds(3600),
        },
    )
}

pub fn key_manager_with(clock: Arc<dyn Clock>, config: KeyManagerConfig) -> Arc<KeyManager> {
    let storage = Arc::new(InMemoryStorage::<SigningKey>::new());

    Arc::new(KeyManager::new(
        Arc::new(StorageSigningKeyRepository::new(storage)),
        Arc::new(PooledKeyGenerator::new()),
        clock,
        config,
    ))
}

pub fn claim_set(value: Value) -> ClaimSet {
    serde_json::from_value(value).unwrap()
}

/// Fully wired application with deterministic token ids
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_admin_token(token: &str) -> Self {
        let mut config = AppConfig::default();
        config.auth.admin_token = Some(token.to_string());
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let state = crate::build_app_state(
            &config,
            Arc::new(PooledKeyGenerator::new()),
            Arc::new(SystemClock),
            Arc::new(SequentialTokenIds::new()),
        )
        .unwrap();

        Self { state }
    }

    pub fn router(&self) -> Router {
        create_router_with_state(self.state.clone())
    }

    /// Run one request through the router; non-JSON bodies come back as `Null`
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn update_config(&self, update: Value) {
        let update: ConfigUpdate = serde_json::from_value(update).unwrap();
        self.state.config.update(update).await.unwrap();
    }

    pub async fn create_role(&self, name: &str, request: Value) {
        let request: RoleWriteRequest = serde_json::from_value(request).unwrap();
        self.state.roles.upsert(name, request).await.unwrap();
    }
}

impl Deref for TestApp {
    type Target = AppState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}
