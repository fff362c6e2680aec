//! Key generation seam

use async_trait::async_trait;

use super::entity::GeneratedKeyPair;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of new signing key pairs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyGenerator: Send + Sync {
    /// Generate a new key pair; failures surface as `DomainError::KeyGeneration`
    async fn generate(&self) -> Result<GeneratedKeyPair, DomainError>;
}
