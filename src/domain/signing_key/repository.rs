//! Signing key repository trait

use async_trait::async_trait;

use super::entity::{KeyId, SigningKey};
use crate::domain::DomainError;

/// One rotation, written as a single atomic batch
#[derive(Debug, Clone)]
pub struct KeyRotation {
    /// Key becoming active
    pub activate: SigningKey,
    /// Previously active keys, already stamped with `retired_at`
    pub retire: Vec<SigningKey>,
    /// Retired keys past the retention horizon
    pub purge: Vec<KeyId>,
}

#[async_trait]
pub trait SigningKeyRepository: Send + Sync + std::fmt::Debug {
    /// All stored keys ordered by creation time, oldest first
    async fn list(&self) -> Result<Vec<SigningKey>, DomainError>;

    /// Record a rotation: either every write lands or none does
    async fn commit(&self, rotation: KeyRotation) -> Result<(), DomainError>;
}
