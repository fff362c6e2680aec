//! Token Signer

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use moka::sync::Cache;

use super::SIGNING_ALGORITHM;
use crate::domain::claims::ClaimSet;
use crate::domain::signing_key::{KeyId, SigningKey};
use crate::domain::DomainError;
use crate::infrastructure::keys::KeyManager;

const ENCODING_KEY_CACHE_CAPACITY: u64 = 16;

/// Compact token and the id of the key that signed it
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub key_id: KeyId,
}

/// Signs claim sets with the Key Manager's current key
pub struct TokenSigner {
    keys: Arc<KeyManager>,
    encoding_keys: Cache<KeyId, EncodingKey>,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("keys", &self.keys)
            .field("encoding_keys", &"[hidden]")
            .finish()
    }
}

impl TokenSigner {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self {
            keys,
            encoding_keys: Cache::new(ENCODING_KEY_CACHE_CAPACITY),
        }
    }

    pub async fn sign(&self, claims: &ClaimSet) -> Result<SignedToken, DomainError> {
        let key = self.keys.current_signing_key().await?;
        let encoding_key = self.encoding_key(&key)?;

        let mut header = Header::new(SIGNING_ALGORITHM);
        header.kid = Some(key.id().to_string());

        let token = encode(&header, claims, &encoding_key)
            .map_err(|e| DomainError::signing(format!("Failed to sign token: {}", e)))?;

        Ok(SignedToken {
            token,
            key_id: key.id().clone(),
        })
    }

    fn encoding_key(&self, key: &SigningKey) -> Result<EncodingKey, DomainError> {
        if let Some(cached) = self.encoding_keys.get(key.id()) {
            return Ok(cached);
        }

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key_pem().as_bytes())
            .map_err(|e| DomainError::signing(format!("Invalid signing key {}: {}", key.id(), e)))?;

        self.encoding_keys
            .insert(key.id().clone(), encoding_key.clone());

        Ok(encoding_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{claim_set, key_manager};
    use jsonwebtoken::{decode_header, Algorithm};
    use serde_json::json;

    #[tokio::test]
    async fn test_sign_embeds_kid() {
        let keys = key_manager();
        let signer = TokenSigner::new(keys.clone());

        let signed = signer.sign(&claim_set(json!({ "iss": "a" }))).await.unwrap();
        let header = decode_header(&signed.token).unwrap();

        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some(signed.key_id.as_str()));
        assert_eq!(&signed.key_id, keys.current_signing_key().await.unwrap().id());
    }

    #[tokio::test]
    async fn test_same_key_without_rotation() {
        let signer = TokenSigner::new(key_manager());

        let first = signer.sign(&claim_set(json!({}))).await.unwrap();
        let second = signer.sign(&claim_set(json!({}))).await.unwrap();

        assert_eq!(first.key_id, second.key_id);
    }

    #[tokio::test]
    async fn test_new_key_after_rotation() {
        let keys = key_manager();
        let signer = TokenSigner::new(keys.clone());

        let before = signer.sign(&claim_set(json!({}))).await.unwrap();
        let rotated = keys.rotate().await.unwrap();
        let after = signer.sign(&claim_set(json!({}))).await.unwrap();

        assert_ne!(before.key_id, after.key_id);
        assert_eq!(&after.key_id, rotated.id());
    }
}
