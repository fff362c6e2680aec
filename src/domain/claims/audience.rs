//! `aud` value checks shared by role writes and sign requests

use serde_json::Value;

use super::error::ClaimError;
use super::reserved::AUDIENCE;
use crate::domain::pattern::Pattern;

const AUDIENCE_TYPE: &str = "string or list of strings";

/// Check an `aud` value: a single string must match `pattern`; a list must
/// hold at most `max` entries (`-1` for unbounded), each matching `pattern`.
pub fn check_audience(value: &Value, pattern: &Pattern, max: i64) -> Result<(), ClaimError> {
    match value {
        Value::String(aud) => check_one(aud, pattern),
        Value::Array(items) => {
            if max != -1 && items.len() as i64 > max {
                return Err(ClaimError::TooManyAudiences {
                    count: items.len(),
                    max,
                });
            }

            for item in items {
                let aud = item.as_str().ok_or_else(invalid_type)?;
                check_one(aud, pattern)?;
            }

            Ok(())
        }
        _ => Err(invalid_type()),
    }
}

fn check_one(aud: &str, pattern: &Pattern) -> Result<(), ClaimError> {
    if !pattern.is_match(aud) {
        return Err(ClaimError::AudienceMismatch(aud.to_string()));
    }

    Ok(())
}

fn invalid_type() -> ClaimError {
    ClaimError::InvalidType {
        claim: AUDIENCE.to_string(),
        expected: AUDIENCE_TYPE,
    }
}
