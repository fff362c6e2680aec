//! The claim merge pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::audience::check_audience;
use super::error::ClaimError;
use super::reserved::{
    is_structural_claim, AUDIENCE, EXPIRES_AT, ISSUED_AT, ISSUER, NOT_BEFORE, SUBJECT, TOKEN_ID,
};
use crate::domain::config::IssuerConfig;
use crate::domain::role::Role;

/// Final, validated claims of a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn issuer(&self) -> Option<&str> {
        self.0.get(ISSUER).and_then(Value::as_str)
    }

    pub fn token_id(&self) -> Option<&str> {
        self.0.get(TOKEN_ID).and_then(Value::as_str)
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.0.get(ISSUED_AT).and_then(Value::as_i64)
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.0.get(EXPIRES_AT).and_then(Value::as_i64)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Merge role claims, config policy and requested claims into the final
/// claim set.
///
/// Validation runs in a fixed order and stops at the first failure:
///
/// 1. structural claims (`iss`, `exp`, `iat`, `nbf`, `jti`) are never
///    requestable;
/// 2. a request may not touch any claim the role fixes, and every requested
///    claim other than `aud`/`sub` must be allow-listed by the config;
/// 3. `sub` must be a string matching the role subject pattern, if any;
/// 4. `aud` must be a string or list of strings satisfying the effective
///    pattern and count, where the role's value replaces the config's.
///
/// `next_token_id` is only called once validation has passed.
pub fn merge_claims(
    role: &Role,
    config: &IssuerConfig,
    requested: &Map<String, Value>,
    issued_at: DateTime<Utc>,
    next_token_id: impl FnOnce() -> String,
) -> Result<ClaimSet, ClaimError> {
    if let Some(name) = requested.keys().find(|name| is_structural_claim(name)) {
        return Err(ClaimError::ReservedClaim(name.clone()));
    }

    for name in requested.keys() {
        if role.claims().contains_key(name) {
            return Err(ClaimError::RoleClaimOverride(name.clone()));
        }

        if name != AUDIENCE && name != SUBJECT && !config.is_claim_allowed(name) {
            return Err(ClaimError::DisallowedClaim(name.clone()));
        }
    }

    if let Some(subject) = requested.get(SUBJECT) {
        let subject = subject.as_str().ok_or_else(|| ClaimError::InvalidType {
            claim: SUBJECT.to_string(),
            expected: "string",
        })?;

        if let Some(pattern) = role.subject_pattern() {
            if !pattern.is_match(subject) {
                return Err(ClaimError::SubjectMismatch(subject.to_string()));
            }
        }
    }

    if let Some(audience) = requested.get(AUDIENCE) {
        let pattern = role
            .audience_pattern()
            .unwrap_or_else(|| config.audience_pattern());
        let max = role.max_audiences().unwrap_or_else(|| config.max_audiences());

        check_audience(audience, pattern, max)?;
    }

    let expires_at = config
        .token_ttl()
        .and_then(|ttl| issued_at.checked_add_signed(ttl))
        .ok_or(ClaimError::TokenLifetime(config.token_ttl_secs()))?;

    let mut claims = role.claims().clone();

    for (name, value) in requested {
        claims.insert(name.clone(), value.clone());
    }

    let iat = issued_at.timestamp();
    let exp = expires_at.timestamp();

    claims.insert(ISSUER.to_string(), Value::from(role.issuer()));
    claims.insert(ISSUED_AT.to_string(), Value::from(iat));
    claims.insert(NOT_BEFORE.to_string(), Value::from(iat));
    claims.insert(EXPIRES_AT.to_string(), Value::from(exp));
    claims.insert(TOKEN_ID.to_string(), Value::from(next_token_id()));

    Ok(ClaimSet(claims))
}
