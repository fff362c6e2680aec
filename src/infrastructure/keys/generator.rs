//! RSA key pair generation

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

use crate::domain::signing_key::{GeneratedKeyPair, KeyGenerator};
use crate::domain::DomainError;

/// Smallest modulus accepted for RS256 signing keys
pub const MIN_RSA_BITS: usize = 2048;

/// Generates RSA key pairs off the async runtime
#[derive(Debug, Clone)]
pub struct RsaKeyGenerator {
    bits: usize,
}

impl RsaKeyGenerator {
    pub fn new(bits: usize) -> Result<Self, DomainError> {
        if bits < MIN_RSA_BITS {
            return Err(DomainError::configuration(format!(
                "RSA keys must be at least {} bits, got {}",
                MIN_RSA_BITS, bits
            )));
        }

        Ok(Self { bits })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }
}

#[async_trait]
impl KeyGenerator for RsaKeyGenerator {
    async fn generate(&self) -> Result<GeneratedKeyPair, DomainError> {
        let bits = self.bits;

        tokio::task::spawn_blocking(move || {
            let private_key = RsaPrivateKey::new(&mut OsRng, bits)
                .map_err(|e| DomainError::key_generation(format!("RSA generation failed: {}", e)))?;

            key_pair_from_private(&private_key)
        })
        .await
        .map_err(|e| DomainError::key_generation(format!("Key generation task failed: {}", e)))?
    }
}

/// Encode an RSA private key as stored key material
pub fn key_pair_from_private(private_key: &RsaPrivateKey) -> Result<GeneratedKeyPair, DomainError> {
    let private_key_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| DomainError::key_generation(format!("Failed to encode RSA private key: {}", e)))?;

    Ok(GeneratedKeyPair {
        private_key_pem: private_key_pem.as_str().to_owned(),
        modulus: URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be()),
        exponent: URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be()),
    })
}
