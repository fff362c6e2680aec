//! Storage-backed issuer config repository

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    config::{ConfigRepository, IssuerConfig, IssuerConfigId},
    storage::Storage,
    DomainError,
};

/// Storage-backed configuration repository
pub struct StorageConfigRepository {
    storage: Arc<dyn Storage<IssuerConfig>>,
}

impl StorageConfigRepository {
    pub fn new(storage: Arc<dyn Storage<IssuerConfig>>) -> Self {
        Self { storage }
    }
}

impl fmt::Debug for StorageConfigRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfigRepository").finish_non_exhaustive()
    }
}

#[async_trait]
impl ConfigRepository for StorageConfigRepository {
    async fn get(&self) -> Result<IssuerConfig, DomainError> {
        let key = IssuerConfigId::singleton();

        // Defaults until the first write
        Ok(self.storage.get(&key).await?.unwrap_or_default())
    }

    async fn save(&self, config: IssuerConfig) -> Result<IssuerConfig, DomainError> {
        self.storage.put(config.clone()).await?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ConfigUpdate;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repository() -> StorageConfigRepository {
        StorageConfigRepository::new(Arc::new(InMemoryStorage::<IssuerConfig>::new()))
    }

    #[tokio::test]
    async fn test_defaults_before_first_write() {
        let repo = create_repository();
        let config = repo.get().await.unwrap();

        assert!(config.allowed_claims().is_empty());
        assert_eq!(config.max_audiences(), -1);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let repo = create_repository();
        let mut config = repo.get().await.unwrap();
        config
            .apply(ConfigUpdate {
                allowed_claims: Some(vec!["tenant".to_string()]),
                ..Default::default()
            })
            .unwrap();

        repo.save(config).await.unwrap();

        let reloaded = repo.get().await.unwrap();
        assert!(reloaded.is_claim_allowed("tenant"));
    }
}
