//! Signing key infrastructure: RSA generation, storage and the key manager

mod generator;
mod manager;
mod storage_repository;

pub use generator::{key_pair_from_private, RsaKeyGenerator, MIN_RSA_BITS};
pub use manager::{KeyManager, KeyManagerConfig};
pub use storage_repository::StorageSigningKeyRepository;
