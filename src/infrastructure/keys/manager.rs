//! Key Manager
//!
//! Owns the rotating signing key set. Rotation and the "current key" read
//! share one async mutex, so no caller ever observes zero or two active
//! keys. Each rotation is committed as a single atomic storage batch.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::domain::signing_key::{
    KeyGenerator, KeyId, KeyRotation, SigningKey, SigningKeyRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::clock::Clock;
use crate::infrastructure::observability::record_key_rotation;

/// Rotation and retention policy
#[derive(Debug, Clone)]
pub struct KeyManagerConfig {
    /// Age after which the active key is replaced on next use; `None`
    /// rotates only on explicit request
    pub rotation_period: Option<Duration>,
    /// How long a retired key stays published for verification
    pub retention: Duration,
}

impl Default for KeyManagerConfig {
    fn default() -> Self {
        Self {
            rotation_period: Some(Duration::seconds(900)),
            retention: Duration::seconds(3600),
        }
    }
}

pub struct KeyManager {
    repository: Arc<dyn SigningKeyRepository>,
    generator: Arc<dyn KeyGenerator>,
    clock: Arc<dyn Clock>,
    config: KeyManagerConfig,
    rotation_lock: Mutex<()>,
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("repository", &self.repository)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl KeyManager {
    pub fn new(
        repository: Arc<dyn SigningKeyRepository>,
        generator: Arc<dyn KeyGenerator>,
        clock: Arc<dyn Clock>,
        config: KeyManagerConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            clock,
            config,
            rotation_lock: Mutex::new(()),
        }
    }

    /// The active signing key.
    ///
    /// Rotates first when no key exists yet (first sign of the system's
    /// lifetime) or when the active key is older than the rotation period.
    pub async fn current_signing_key(&self) -> Result<SigningKey, DomainError> {
        let _guard = self.rotation_lock.lock().await;
        let keys = self.repository.list().await?;
        let now = self.clock.now();

        match keys.iter().rev().find(|key| key.is_active()) {
            None => {
                info!("No signing key yet, creating the initial key");
                self.rotate_locked(keys).await
            }
            Some(key) if self.is_due(key, now) => {
                info!(kid = %key.id(), "Active signing key past rotation period");
                self.rotate_locked(keys).await
            }
            Some(key) => Ok(key.clone()),
        }
    }

    /// Generate a new key, retire the active one and purge retired keys past
    /// the retention horizon
    pub async fn rotate(&self) -> Result<SigningKey, DomainError> {
        let _guard = self.rotation_lock.lock().await;
        let keys = self.repository.list().await?;

        self.rotate_locked(keys).await
    }

    /// Active key plus retired keys still inside the retention horizon,
    /// oldest first
    pub async fn verification_key_set(&self) -> Result<Vec<SigningKey>, DomainError> {
        let now = self.clock.now();
        let keys = self.repository.list().await?;

        Ok(keys
            .into_iter()
            .filter(|key| !key.is_expired(now, self.config.retention))
            .collect())
    }

    /// Look up a verification key by id
    pub async fn find_key(&self, kid: &str) -> Result<SigningKey, DomainError> {
        let keys = self.verification_key_set().await?;

        if keys.is_empty() {
            return Err(DomainError::NoSigningKeys);
        }

        keys.into_iter()
            .rev()
            .find(|key| key.id().as_str() == kid)
            .ok_or_else(|| DomainError::unknown_key(kid))
    }

    fn is_due(&self, key: &SigningKey, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.config
            .rotation_period
            .is_some_and(|period| key.age(now) >= period)
    }

    async fn rotate_locked(&self, keys: Vec<SigningKey>) -> Result<SigningKey, DomainError> {
        let pair = self.generator.generate().await.map_err(|e| {
            error!(error = %e, "Signing key generation failed");
            e
        })?;

        let now = self.clock.now();
        let sequence = keys.iter().map(SigningKey::sequence).max().unwrap_or(0) + 1;
        let activate = SigningKey::new(KeyId::generate(), pair, now).with_sequence(sequence);

        let mut retire = Vec::new();
        let mut purge = Vec::new();
        let mut remaining = 1;

        for mut key in keys {
            if key.is_active() {
                key.retire(now);
                retire.push(key);
                remaining += 1;
            } else if key.is_expired(now, self.config.retention) {
                purge.push(key.id().clone());
            } else {
                remaining += 1;
            }
        }

        debug!(
            retired = retire.len(),
            purged = purge.len(),
            "Committing key rotation"
        );

        self.repository
            .commit(KeyRotation {
                activate: activate.clone(),
                retire,
                purge,
            })
            .await?;

        record_key_rotation(remaining);
        info!(kid = %activate.id(), "Rotated signing key");

        Ok(activate)
    }
}
