//! Token verification against the published key set

use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

use super::SIGNING_ALGORITHM;
use crate::domain::claims::ClaimSet;
use crate::domain::DomainError;
use crate::infrastructure::keys::KeyManager;

#[derive(Debug)]
pub struct TokenVerifier {
    keys: Arc<KeyManager>,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self { keys }
    }

    /// Select the verification key named by the token's `kid`, then check
    /// the signature and expiry. Audience is not checked here.
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, DomainError> {
        let header = decode_header(token)
            .map_err(|e| DomainError::validation(format!("Malformed token: {}", e)))?;

        let kid = header
            .kid
            .ok_or_else(|| DomainError::validation("Token header carries no key id"))?;

        let key = self.keys.find_key(&kid).await?;

        let decoding_key = DecodingKey::from_rsa_components(key.modulus(), key.exponent())
            .map_err(|e| DomainError::internal(format!("Invalid published key {}: {}", kid, e)))?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_aud = false;

        let data = decode::<ClaimSet>(token, &decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid token: {}", e)))?;

        Ok(data.claims)
    }
}
