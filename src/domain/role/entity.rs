//! Role entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{validate_role_name, RoleValidationError};
use crate::domain::pattern::Pattern;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Role name, lowercased on construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, RoleValidationError> {
        let name = name.as_ref().to_lowercase();
        validate_role_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoleName {
    type Error = RoleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(name: RoleName) -> Self {
        name.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for RoleName {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fields accepted when creating or updating a role; absent fields are left
/// untouched on update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleWriteRequest {
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub claims: Option<Map<String, Value>>,
    #[serde(default)]
    pub subject_pattern: Option<String>,
    #[serde(default)]
    pub audience_pattern: Option<String>,
    #[serde(default)]
    pub max_audiences: Option<i64>,
}

/// Named template for the tokens issued under it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    name: RoleName,
    issuer: String,
    #[serde(default)]
    claims: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject_pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audience_pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_audiences: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(name: RoleName, issuer: impl Into<String>) -> Result<Self, RoleValidationError> {
        let issuer = issuer.into();

        if issuer.trim().is_empty() {
            return Err(RoleValidationError::MissingIssuer);
        }

        let now = Utc::now();

        Ok(Self {
            name,
            issuer,
            claims: Map::new(),
            subject_pattern: None,
            audience_pattern: None,
            max_audiences: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Build a role from a create request; `issuer` is mandatory here
    pub fn from_request(
        name: RoleName,
        request: RoleWriteRequest,
    ) -> Result<Self, RoleValidationError> {
        let issuer = request
            .issuer
            .clone()
            .ok_or(RoleValidationError::MissingIssuer)?;

        let mut role = Self::new(name, issuer)?;
        role.apply(request)?;
        Ok(role)
    }

    /// Apply the supplied fields. Patterns are compiled before anything is
    /// assigned, so a failed update leaves the role unchanged.
    pub fn apply(&mut self, request: RoleWriteRequest) -> Result<(), RoleValidationError> {
        if let Some(issuer) = &request.issuer {
            if issuer.trim().is_empty() {
                return Err(RoleValidationError::MissingIssuer);
            }
        }

        let subject_pattern = request
            .subject_pattern
            .as_deref()
            .map(|source| {
                Pattern::new(source)
                    .map_err(|e| RoleValidationError::InvalidSubjectPattern(e.to_string()))
            })
            .transpose()?;

        let audience_pattern = request
            .audience_pattern
            .as_deref()
            .map(|source| {
                Pattern::new(source)
                    .map_err(|e| RoleValidationError::InvalidAudiencePattern(e.to_string()))
            })
            .transpose()?;

        if let Some(issuer) = request.issuer {
            self.issuer = issuer;
        }

        if let Some(claims) = request.claims {
            self.claims = claims;
        }

        if subject_pattern.is_some() {
            self.subject_pattern = subject_pattern;
        }

        if audience_pattern.is_some() {
            self.audience_pattern = audience_pattern;
        }

        if request.max_audiences.is_some() {
            self.max_audiences = request.max_audiences;
        }

        self.touch();
        Ok(())
    }

    // Getters

    pub fn name(&self) -> &RoleName {
        &self.name
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn subject_pattern(&self) -> Option<&Pattern> {
        self.subject_pattern.as_ref()
    }

    pub fn audience_pattern(&self) -> Option<&Pattern> {
        self.audience_pattern.as_ref()
    }

    pub fn max_audiences(&self) -> Option<i64> {
        self.max_audiences
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Role {
    type Key = RoleName;

    fn key(&self) -> &Self::Key {
        &self.name
    }
}
