//! Signing key entity

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};

/// Key identifier, carried as `kid` in token headers and JWKS entries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for KeyId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Freshly generated key material
#[derive(Clone)]
pub struct GeneratedKeyPair {
    /// PKCS#1 PEM of the private key
    pub private_key_pem: String,
    /// Base64url (unpadded) big-endian modulus
    pub modulus: String,
    /// Base64url (unpadded) big-endian public exponent
    pub exponent: String,
}

impl fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKeyPair")
            .field("private_key_pem", &"[hidden]")
            .field("modulus", &self.modulus)
            .field("exponent", &self.exponent)
            .finish()
    }
}

/// A stored signing key
#[derive(Clone, Serialize, Deserialize)]
pub struct SigningKey {
    id: KeyId,
    private_key_pem: String,
    modulus: String,
    exponent: String,
    /// Position in rotation order, strictly increasing per key set
    #[serde(default)]
    sequence: u64,
    created_at: DateTime<Utc>,
    #[serde(default)]
    retired_at: Option<DateTime<Utc>>,
}

impl SigningKey {
    pub fn new(id: KeyId, pair: GeneratedKeyPair, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            private_key_pem: pair.private_key_pem,
            modulus: pair.modulus,
            exponent: pair.exponent,
            sequence: 0,
            created_at,
            retired_at: None,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn is_active(&self) -> bool {
        self.retired_at.is_none()
    }

    pub fn retire(&mut self, at: DateTime<Utc>) {
        self.retired_at.get_or_insert(at);
    }

    /// True when retired for longer than `retention`
    pub fn is_expired(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        self.retired_at
            .is_some_and(|retired_at| now - retired_at > retention)
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    // Getters

    pub fn id(&self) -> &KeyId {
        &self.id
    }

    /// Private key material; only the token signer reads this
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    pub fn modulus(&self) -> &str {
        &self.modulus
    }

    pub fn exponent(&self) -> &str {
        &self.exponent
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn retired_at(&self) -> Option<DateTime<Utc>> {
        self.retired_at
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("id", &self.id)
            .field("private_key_pem", &"[hidden]")
            .field("sequence", &self.sequence)
            .field("created_at", &self.created_at)
            .field("retired_at", &self.retired_at)
            .finish()
    }
}

impl StorageEntity for SigningKey {
    type Key = KeyId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
