//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// A single write inside an atomic batch
#[derive(Debug, Clone)]
pub enum StorageOp<E: StorageEntity> {
    /// Insert or overwrite the entity under its key
    Put(E),
    /// Remove the entity stored under the key, if any
    Delete(E::Key),
}

/// Key/value storage for one record namespace.
///
/// Writes through [`Storage::put`] and [`Storage::delete`] are independent
/// last-writer-wins operations. [`Storage::apply`] is the only multi-record
/// write and must be all-or-nothing: readers observe either none or all of
/// the batch.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves every entity in the namespace, in no particular order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates or replaces an entity
    async fn put(&self, entity: E) -> Result<(), DomainError>;

    /// Deletes an entity by its key, returns true if something was removed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Applies a batch of writes atomically
    async fn apply(&self, ops: Vec<StorageOp<E>>) -> Result<(), DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }
}
