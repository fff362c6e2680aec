//! Signing key domain
//!
//! Keys move through `active -> retired -> purged`. Exactly one stored key is
//! active (`retired_at` unset); retired keys stay published for verification
//! until the retention horizon passes.

mod entity;
mod generator;
mod repository;

pub use entity::{GeneratedKeyPair, KeyId, SigningKey};
pub use generator::KeyGenerator;
pub use repository::{KeyRotation, SigningKeyRepository};

#[cfg(test)]
pub use generator::MockKeyGenerator;
