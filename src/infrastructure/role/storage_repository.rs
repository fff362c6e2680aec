//! Storage-backed role repository implementation

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::role::{Role, RoleName, RoleRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of RoleRepository
pub struct StorageRoleRepository {
    storage: Arc<dyn Storage<Role>>,
}

impl StorageRoleRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Role>>) -> Self {
        Self { storage }
    }
}

impl fmt::Debug for StorageRoleRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageRoleRepository").finish_non_exhaustive()
    }
}

#[async_trait]
impl RoleRepository for StorageRoleRepository {
    async fn get(&self, name: &RoleName) -> Result<Option<Role>, DomainError> {
        self.storage.get(name).await
    }

    async fn save(&self, role: Role) -> Result<Role, DomainError> {
        self.storage.put(role.clone()).await?;
        Ok(role)
    }

    async fn delete(&self, name: &RoleName) -> Result<bool, DomainError> {
        self.storage.delete(name).await
    }

    async fn list_names(&self) -> Result<Vec<RoleName>, DomainError> {
        let mut names: Vec<RoleName> = self
            .storage
            .list()
            .await?
            .into_iter()
            .map(|role| role.name().clone())
            .collect();

        names.sort();
        Ok(names)
    }

    async fn exists(&self, name: &RoleName) -> Result<bool, DomainError> {
        self.storage.exists(name).await
    }
}
