//! Configuration service - Reads and updates the issuer policy

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ConfigRepository, ConfigUpdate, DomainError, IssuerConfig};

/// Configuration service for the issuer policy singleton
#[derive(Debug)]
pub struct ConfigService {
    repository: Arc<dyn ConfigRepository>,
}

impl ConfigService {
    /// Create a new ConfigService with the given repository
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }

    /// Get the current configuration
    pub async fn get(&self) -> Result<IssuerConfig, DomainError> {
        debug!("Loading issuer config");
        self.repository.get().await
    }

    /// Apply a partial update; nothing is written if any field is invalid.
    /// Existing roles are not re-validated against the new policy.
    pub async fn update(&self, update: ConfigUpdate) -> Result<IssuerConfig, DomainError> {
        let mut config = self.repository.get().await?;
        config.apply(update)?;

        let config = self.repository.save(config).await?;

        info!(
            allowed_claims = config.allowed_claims().len(),
            audience_pattern = %config.audience_pattern(),
            max_audiences = config.max_audiences(),
            token_ttl_secs = config.token_ttl_secs(),
            "Updated issuer config"
        );

        Ok(config)
    }
}
