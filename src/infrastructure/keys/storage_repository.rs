//! Storage-backed signing key repository

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::signing_key::{KeyRotation, SigningKey, SigningKeyRepository};
use crate::domain::storage::{Storage, StorageOp};
use crate::domain::DomainError;

/// Keys live under their own namespace keyed by key id; a rotation is one
/// [`Storage::apply`] batch.
pub struct StorageSigningKeyRepository {
    storage: Arc<dyn Storage<SigningKey>>,
}

impl StorageSigningKeyRepository {
    pub fn new(storage: Arc<dyn Storage<SigningKey>>) -> Self {
        Self { storage }
    }
}

impl fmt::Debug for StorageSigningKeyRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSigningKeyRepository")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SigningKeyRepository for StorageSigningKeyRepository {
    async fn list(&self) -> Result<Vec<SigningKey>, DomainError> {
        let mut keys = self.storage.list().await?;
        keys.sort_by(|a, b| {
            a.sequence()
                .cmp(&b.sequence())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });
        Ok(keys)
    }

    async fn commit(&self, rotation: KeyRotation) -> Result<(), DomainError> {
        let mut ops: Vec<StorageOp<SigningKey>> = rotation
            .retire
            .into_iter()
            .map(StorageOp::Put)
            .collect();

        ops.push(StorageOp::Put(rotation.activate));
        ops.extend(rotation.purge.into_iter().map(StorageOp::Delete));

        self.storage.apply(ops).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signing_key::{GeneratedKeyPair, KeyId};
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{Duration, Utc};

    fn pair() -> GeneratedKeyPair {
        GeneratedKeyPair {
            private_key_pem: "pem".to_string(),
            modulus: "n".to_string(),
            exponent: "AQAB".to_string(),
        }
    }

    fn key(id: &str, created_offset_secs: i64) -> SigningKey {
        SigningKey::new(
            KeyId::new(id),
            pair(),
            Utc::now() + Duration::seconds(created_offset_secs),
        )
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let storage = Arc::new(InMemoryStorage::<SigningKey>::new());
        storage.put(key("newest", 20)).await.unwrap();
        storage.put(key("oldest", 0)).await.unwrap();
        storage.put(key("middle", 10)).await.unwrap();

        let repo = StorageSigningKeyRepository::new(storage);
        let ids: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|k| k.id().to_string())
            .collect();

        assert_eq!(ids, vec!["oldest", "middle", "newest"]);
    }

    #[tokio::test]
    async fn test_same_instant_keys_ordered_by_sequence() {
        let storage = Arc::new(InMemoryStorage::<SigningKey>::new());
        let created = Utc::now();

        for (id, sequence) in [("a-third", 3), ("z-first", 1), ("m-second", 2)] {
            let key = SigningKey::new(KeyId::new(id), pair(), created).with_sequence(sequence);
            storage.put(key).await.unwrap();
        }

        let repo = StorageSigningKeyRepository::new(storage);
        let ids: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|k| k.id().to_string())
            .collect();

        assert_eq!(ids, vec!["z-first", "m-second", "a-third"]);
    }

    #[tokio::test]
    async fn test_commit_rotation() {
        let storage = Arc::new(InMemoryStorage::<SigningKey>::new());
        let repo = StorageSigningKeyRepository::new(storage.clone());

        let mut expired = key("expired", 0);
        expired.retire(Utc::now());
        let current = key("current", 10);
        storage.put(expired).await.unwrap();
        storage.put(current.clone()).await.unwrap();

        let mut retired = current;
        retired.retire(Utc::now());

        repo.commit(KeyRotation {
            activate: key("next", 20),
            retire: vec![retired],
            purge: vec![KeyId::new("expired")],
        })
        .await
        .unwrap();

        let keys = repo.list().await.unwrap();
        let active: Vec<&str> = keys
            .iter()
            .filter(|k| k.is_active())
            .map(|k| k.id().as_str())
            .collect();

        assert_eq!(keys.len(), 2);
        assert_eq!(active, vec!["next"]);
    }
}
