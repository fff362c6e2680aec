use thiserror::Error;

use super::claims::ClaimError;
use super::config::ConfigValidationError;
use super::role::RoleValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Policy violation: {message}")]
    PolicyViolation { message: String },

    #[error("Invalid claim type: {message}")]
    InvalidClaimType { message: String },

    #[error("Unknown signing key: {kid}")]
    UnknownKey { kid: String },

    #[error("No signing keys configured")]
    NoSigningKeys,

    #[error("Key generation failed: {message}")]
    KeyGeneration { message: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn policy(message: impl Into<String>) -> Self {
        Self::PolicyViolation {
            message: message.into(),
        }
    }

    pub fn invalid_claim_type(message: impl Into<String>) -> Self {
        Self::InvalidClaimType {
            message: message.into(),
        }
    }

    pub fn unknown_key(kid: impl Into<String>) -> Self {
        Self::UnknownKey { kid: kid.into() }
    }

    pub fn key_generation(message: impl Into<String>) -> Self {
        Self::KeyGeneration {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<ClaimError> for DomainError {
    fn from(err: ClaimError) -> Self {
        if err.is_config_error() {
            Self::configuration(err.to_string())
        } else if err.is_type_error() {
            Self::invalid_claim_type(err.to_string())
        } else {
            Self::policy(err.to_string())
        }
    }
}

impl From<RoleValidationError> for DomainError {
    fn from(err: RoleValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<ConfigValidationError> for DomainError {
    fn from(err: ConfigValidationError) -> Self {
        Self::validation(err.to_string())
    }
}
