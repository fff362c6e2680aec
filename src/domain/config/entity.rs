//! Issuer config entity

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_allowed_claim, validate_max_audiences, validate_token_ttl, ConfigValidationError,
};
use crate::domain::pattern::Pattern;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Default lifetime of issued tokens (three minutes)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 180;

const SINGLETON_KEY: &str = "config";

/// Storage key of the config record; there is only ever one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssuerConfigId(String);

impl IssuerConfigId {
    pub fn singleton() -> Self {
        Self(SINGLETON_KEY.to_string())
    }
}

impl Default for IssuerConfigId {
    fn default() -> Self {
        Self::singleton()
    }
}

impl StorageKey for IssuerConfigId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Partial update of the issuer config; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub allowed_claims: Option<Vec<String>>,
    #[serde(default)]
    pub audience_pattern: Option<String>,
    #[serde(default)]
    pub max_audiences: Option<i64>,
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
}

/// Process-wide issuance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerConfig {
    #[serde(default)]
    id: IssuerConfigId,
    /// Claim names, beyond `aud`/`sub`, that roles and requests may set
    allowed_claims: BTreeSet<String>,
    /// Default constraint on `aud` values
    audience_pattern: Pattern,
    /// Ceiling on list-valued `aud`, `-1` for unbounded
    max_audiences: i64,
    token_ttl_secs: u64,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            id: IssuerConfigId::singleton(),
            allowed_claims: BTreeSet::new(),
            audience_pattern: Pattern::match_all(),
            max_audiences: -1,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            updated_at: Utc::now(),
        }
    }
}

impl IssuerConfig {
    /// Builder-style allow-list used mostly by tests and bootstrap code
    pub fn with_allowed_claims<I, S>(mut self, claims: I) -> Result<Self, ConfigValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_claims = collect_allowed_claims(claims)?;
        Ok(self)
    }

    pub fn with_audience_pattern(mut self, pattern: &str) -> Result<Self, ConfigValidationError> {
        self.audience_pattern = compile_audience_pattern(pattern)?;
        Ok(self)
    }

    pub fn with_max_audiences(mut self, max: i64) -> Result<Self, ConfigValidationError> {
        validate_max_audiences(max)?;
        self.max_audiences = max;
        Ok(self)
    }

    pub fn with_token_ttl_secs(mut self, secs: u64) -> Result<Self, ConfigValidationError> {
        validate_token_ttl(secs)?;
        self.token_ttl_secs = secs;
        Ok(self)
    }

    /// Apply a partial update. Every supplied field is validated before any
    /// of them is assigned, so a failed update leaves the config unchanged.
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<(), ConfigValidationError> {
        let allowed_claims = update
            .allowed_claims
            .map(collect_allowed_claims)
            .transpose()?;
        let audience_pattern = update
            .audience_pattern
            .as_deref()
            .map(compile_audience_pattern)
            .transpose()?;

        if let Some(max) = update.max_audiences {
            validate_max_audiences(max)?;
        }

        if let Some(ttl) = update.token_ttl_secs {
            validate_token_ttl(ttl)?;
        }

        if let Some(claims) = allowed_claims {
            self.allowed_claims = claims;
        }

        if let Some(pattern) = audience_pattern {
            self.audience_pattern = pattern;
        }

        if let Some(max) = update.max_audiences {
            self.max_audiences = max;
        }

        if let Some(ttl) = update.token_ttl_secs {
            self.token_ttl_secs = ttl;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    // Getters

    pub fn allowed_claims(&self) -> &BTreeSet<String> {
        &self.allowed_claims
    }

    pub fn is_claim_allowed(&self, name: &str) -> bool {
        self.allowed_claims.contains(name)
    }

    pub fn audience_pattern(&self) -> &Pattern {
        &self.audience_pattern
    }

    pub fn max_audiences(&self) -> i64 {
        self.max_audiences
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Token lifetime, `None` when the stored value does not fit a duration
    pub fn token_ttl(&self) -> Option<Duration> {
        i64::try_from(self.token_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl StorageEntity for IssuerConfig {
    type Key = IssuerConfigId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

fn collect_allowed_claims<I, S>(claims: I) -> Result<BTreeSet<String>, ConfigValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    claims
        .into_iter()
        .map(|claim| {
            let claim = claim.into();
            validate_allowed_claim(&claim)?;
            Ok(claim)
        })
        .collect()
}

fn compile_audience_pattern(source: &str) -> Result<Pattern, ConfigValidationError> {
    Pattern::new(source).map_err(|e| ConfigValidationError::InvalidAudiencePattern(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IssuerConfig::default();

        assert!(config.allowed_claims().is_empty());
        assert_eq!(config.audience_pattern().as_str(), ".*");
        assert_eq!(config.max_audiences(), -1);
        assert_eq!(config.token_ttl_secs(), DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(config.key().as_str(), "config");
    }

    #[test]
    fn test_apply_partial_update() {
        let mut config = IssuerConfig::default();

        config
            .apply(ConfigUpdate {
                allowed_claims: Some(vec!["aud".to_string(), "foo".to_string()]),
                max_audiences: Some(3),
                ..Default::default()
            })
            .unwrap();

        assert!(config.is_claim_allowed("foo"));
        assert!(config.is_claim_allowed("aud"));
        assert_eq!(config.max_audiences(), 3);
        assert_eq!(config.audience_pattern().as_str(), ".*");
    }

    #[test]
    fn test_apply_invalid_pattern_leaves_config_unchanged() {
        let mut config = IssuerConfig::default();

        let result = config.apply(ConfigUpdate {
            allowed_claims: Some(vec!["foo".to_string()]),
            audience_pattern: Some("(".to_string()),
            ..Default::default()
        });

        assert!(matches!(
            result,
            Err(ConfigValidationError::InvalidAudiencePattern(_))
        ));
        assert!(config.allowed_claims().is_empty());
    }

    #[test]
    fn test_apply_rejects_max_below_minus_one() {
        let mut config = IssuerConfig::default();

        let result = config.apply(ConfigUpdate {
            max_audiences: Some(-5),
            ..Default::default()
        });

        assert_eq!(result, Err(ConfigValidationError::InvalidMaxAudiences(-5)));
        assert_eq!(config.max_audiences(), -1);
    }

    #[test]
    fn test_apply_rejects_oversized_ttl() {
        let mut config = IssuerConfig::default();

        for secs in [u64::MAX, 100_000_000_000_000_000] {
            let result = config.apply(ConfigUpdate {
                token_ttl_secs: Some(secs),
                ..Default::default()
            });

            assert_eq!(result, Err(ConfigValidationError::InvalidTokenTtl(secs)));
        }

        assert_eq!(config.token_ttl_secs(), DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(config.token_ttl(), Some(Duration::seconds(180)));
    }

    #[test]
    fn test_token_ttl_out_of_range_when_stored_unchecked() {
        let mut json = serde_json::to_value(IssuerConfig::default()).unwrap();
        json["token_ttl_secs"] = serde_json::json!(u64::MAX);

        let config: IssuerConfig = serde_json::from_value(json).unwrap();

        assert_eq!(config.token_ttl(), None);
    }

    #[test]
    fn test_apply_rejects_reserved_allowed_claim() {
        let mut config = IssuerConfig::default();

        let result = config.apply(ConfigUpdate {
            allowed_claims: Some(vec!["exp".to_string()]),
            ..Default::default()
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_through_json_keeps_pattern() {
        let config = IssuerConfig::default()
            .with_audience_pattern("^aud-")
            .unwrap()
            .with_allowed_claims(["tenant"])
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: IssuerConfig = serde_json::from_str(&json).unwrap();

        assert!(restored.audience_pattern().is_match("aud-1"));
        assert!(restored.is_claim_allowed("tenant"));
    }
}
