/// Token Claim Types
///
/// Claim sets handed to the token service at issuance time, the token kind
/// discriminator, and the typed claim set returned by validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::configuration::JwtSettings;

/// Discriminator between short-lived access tokens and longer-lived
/// refresh tokens. Carried in the `type` claim of every issued token;
/// validation enforces an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    /// Configured default lifetime for this kind of token.
    pub fn default_ttl(&self, config: &JwtSettings) -> chrono::Duration {
        match self {
            TokenKind::Access => config.access_token_ttl(),
            TokenKind::Refresh => config.refresh_token_ttl(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied claims for a token to be issued.
///
/// An open claim map: `sub` is always present, everything else is up to the
/// caller. The token service merges `exp` and `type` in at issuance time, so
/// setting those here is pointless (they get overwritten).
#[derive(Debug, Clone)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    /// Create a claim set for the given subject identity.
    pub fn new(subject: impl Into<String>) -> Self {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), Value::String(subject.into()));
        Self { claims }
    }

    /// Attach a role claim.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.claims
            .insert("role".to_string(), Value::String(role.into()));
        self
    }

    /// Attach an arbitrary custom claim.
    pub fn with_claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.claims.insert(name.into(), value);
        self
    }

    /// Copy of the underlying claim map, ready for `exp`/`type` injection.
    pub(crate) fn to_payload(&self) -> Map<String, Value> {
        self.claims.clone()
    }
}

/// The decoded claim set of a token that passed validation.
///
/// Custom claims beyond the well-known fields are preserved in `extra`,
/// so nothing the caller embedded at issuance time is lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user identity)
    #[serde(default)]
    pub sub: String,
    /// Role claim, if one was embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Token kind discriminator
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Expiration time (Unix timestamp, UTC)
    pub exp: i64,
    /// All remaining custom claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Expiry instant as a UTC datetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }

    /// Check if the token has expired.
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_kind_round_trips_through_serde() {
        let access = serde_json::to_value(TokenKind::Access).expect("Failed to serialize");
        assert_eq!(access, json!("access"));

        let refresh: TokenKind =
            serde_json::from_value(json!("refresh")).expect("Failed to deserialize");
        assert_eq!(refresh, TokenKind::Refresh);
    }

    #[test]
    fn test_claim_set_contains_subject_and_role() {
        let claims = ClaimSet::new("u1").with_role("administrator");
        let payload = claims.to_payload();

        assert_eq!(payload.get("sub"), Some(&json!("u1")));
        assert_eq!(payload.get("role"), Some(&json!("administrator")));
    }

    #[test]
    fn test_claim_set_keeps_custom_claims() {
        let claims = ClaimSet::new("u1").with_claim("device", json!("mobile"));
        let payload = claims.to_payload();

        assert_eq!(payload.get("device"), Some(&json!("mobile")));
    }

    #[test]
    fn test_token_claims_preserve_extra_fields() {
        let decoded: TokenClaims = serde_json::from_value(json!({
            "sub": "u1",
            "role": "member",
            "type": "access",
            "exp": 4_102_444_800i64,
            "device": "mobile"
        }))
        .expect("Failed to deserialize claims");

        assert_eq!(decoded.sub, "u1");
        assert_eq!(decoded.kind, TokenKind::Access);
        assert_eq!(decoded.extra.get("device"), Some(&json!("mobile")));
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now().timestamp();
        let live: TokenClaims = serde_json::from_value(json!({
            "sub": "u1", "type": "access", "exp": now + 600
        }))
        .expect("Failed to deserialize claims");
        let stale: TokenClaims = serde_json::from_value(json!({
            "sub": "u1", "type": "access", "exp": now - 600
        }))
        .expect("Failed to deserialize claims");

        assert!(!live.is_expired());
        assert!(stale.is_expired());
    }
}
