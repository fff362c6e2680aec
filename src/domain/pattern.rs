//! Regular expressions persisted as source strings
//!
//! Roles and the issuer config store their patterns as plain strings so the
//! stored representation stays portable. Compilation goes through a
//! process-wide cache keyed by the source text, so loading the same record on
//! every sign request does not recompile the expression.

use std::sync::Arc;

use moka::sync::Cache;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const PATTERN_CACHE_CAPACITY: u64 = 1024;

static COMPILED_PATTERNS: Lazy<Cache<String, Arc<Regex>>> =
    Lazy::new(|| Cache::new(PATTERN_CACHE_CAPACITY));

static MATCH_ALL: Lazy<Arc<Regex>> =
    Lazy::new(|| Arc::new(Regex::new(".*").expect("literal pattern compiles")));

/// A compiled regular expression that serializes as its source string
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    source: String,
    regex: Arc<Regex>,
}

impl Pattern {
    /// Compile a pattern, reusing a cached compilation when available
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();

        if let Some(regex) = COMPILED_PATTERNS.get(&source) {
            return Ok(Self { source, regex });
        }

        let regex = Arc::new(Regex::new(&source)?);
        COMPILED_PATTERNS.insert(source.clone(), Arc::clone(&regex));

        Ok(Self { source, regex })
    }

    /// Pattern that accepts any value
    pub fn match_all() -> Self {
        Self {
            source: ".*".to_string(),
            regex: Arc::clone(&MATCH_ALL),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Unanchored match: the pattern must occur somewhere in `value`
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
