//! Issuer config infrastructure implementations

mod repository;

pub use repository::StorageConfigRepository;
