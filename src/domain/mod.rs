//! Domain layer - Issuance policy, claim merging and key lifecycle types

pub mod claims;
pub mod config;
pub mod error;
pub mod pattern;
pub mod role;
pub mod signing_key;
pub mod storage;

pub use claims::{merge_claims, ClaimError, ClaimSet};
pub use config::{ConfigRepository, ConfigUpdate, IssuerConfig, IssuerConfigId};
pub use error::DomainError;
pub use pattern::Pattern;
pub use role::{Role, RoleName, RoleRepository, RoleValidationError, RoleWriteRequest};
pub use signing_key::{
    GeneratedKeyPair, KeyGenerator, KeyId, KeyRotation, SigningKey, SigningKeyRepository,
};
pub use storage::{Storage, StorageEntity, StorageKey, StorageOp};
