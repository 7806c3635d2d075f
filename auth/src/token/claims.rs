use std::collections::BTreeMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token claims.
///
/// `sub` and `exp` are the claims the service relies on. Anything else rides
/// along in `extra`, which is ordered so that serialization is deterministic.
/// `extra` never holds `sub`, `exp` or `iat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional claims, opaque to verification
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a subject expiring `lifetime` from now.
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.to_string()),
            exp: Some((now + lifetime).timestamp()),
            iat: Some(now.timestamp()),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom claim.
    ///
    /// The registered names `sub`, `exp` and `iat` set the typed fields
    /// instead; a value of the wrong type for them is dropped, as is a value
    /// that cannot be serialized.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let Ok(json_value) = serde_json::to_value(value) else {
            return self;
        };

        match key.to_string().as_str() {
            "sub" => {
                if let Some(sub) = json_value.as_str() {
                    self.sub = Some(sub.to_string());
                }
            }
            "exp" => {
                if let Some(exp) = json_value.as_i64() {
                    self.exp = Some(exp);
                }
            }
            "iat" => {
                if let Some(iat) = json_value.as_i64() {
                    self.iat = Some(iat);
                }
            }
            other => {
                self.extra.insert(other.to_string(), json_value);
            }
        }
        self
    }

    /// Look up a custom claim.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Expired once the current time is strictly past `exp`.
    ///
    /// Claims without `exp` never report expiry here; the codec rejects them
    /// separately.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.is_some_and(|exp| current_timestamp > exp)
    }
}
