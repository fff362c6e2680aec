//! Repository trait for the issuer config singleton

use async_trait::async_trait;

use crate::domain::DomainError;

use super::IssuerConfig;

#[async_trait]
pub trait ConfigRepository: Send + Sync + std::fmt::Debug {
    /// Load the current config, falling back to defaults when never written
    async fn get(&self) -> Result<IssuerConfig, DomainError>;

    /// Persist the config, replacing any previous record
    async fn save(&self, config: IssuerConfig) -> Result<IssuerConfig, DomainError>;
}
