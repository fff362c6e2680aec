//! JWKS publication

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::SIGNING_ALGORITHM;
use crate::domain::signing_key::SigningKey;
use crate::domain::DomainError;
use crate::infrastructure::keys::KeyManager;

/// Public RSA key entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub kid: String,
    /// Base64url modulus
    pub n: String,
    /// Base64url public exponent
    pub e: String,
}

impl From<&SigningKey> for Jwk {
    fn from(key: &SigningKey) -> Self {
        Self {
            kty: "RSA".to_string(),
            key_use: "sig".to_string(),
            alg: format!("{:?}", SIGNING_ALGORITHM),
            kid: key.id().to_string(),
            n: key.modulus().to_string(),
            e: key.exponent().to_string(),
        }
    }
}

/// JWKS document, keys in creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

#[derive(Debug)]
pub struct JwksPublisher {
    keys: Arc<KeyManager>,
}

impl JwksPublisher {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self { keys }
    }

    pub async fn public_key_set(&self) -> Result<JwkSet, DomainError> {
        let keys = self.keys.verification_key_set().await?;

        Ok(JwkSet {
            keys: keys.iter().map(Jwk::from).collect(),
        })
    }
}
