/// JWT Token Issuance and Validation
///
/// Issues signed, self-contained access and refresh tokens and validates
/// presented tokens against signature, declared kind, and expiry. Every
/// rejection path is logged with its own reason, but callers only ever see
/// "invalid": expired must not be distinguishable from tampered.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::auth::claims::{ClaimSet, TokenClaims, TokenKind};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Transport scheme label a misbehaving client may leave on the token.
const BEARER_PREFIX: &str = "Bearer ";

/// Truncate a token for log lines. Never log a full token.
fn redact(token: &str) -> String {
    let end = token
        .char_indices()
        .nth(12)
        .map_or(token.len(), |(i, _)| i);
    format!("{}..", &token[..end])
}

/// Issue a signed token of the given kind
///
/// Merges `exp = now_utc + ttl` and the kind discriminator into a copy of
/// the caller's claim set and signs it with the configured secret and
/// algorithm. The result is self-contained: no server-side record is needed
/// to validate it later.
///
/// # Arguments
/// * `claims` - Caller claims; must carry the subject, may carry anything else
/// * `kind` - Access or refresh
/// * `ttl_override` - Lifetime overriding the configured default for `kind`
/// * `config` - JWT configuration settings
///
/// # Errors
/// Returns error only on signing misconfiguration (bad algorithm/secret),
/// which is a process-level fault, not a per-request condition.
pub fn issue_token(
    claims: &ClaimSet,
    kind: TokenKind,
    ttl_override: Option<Duration>,
    config: &JwtSettings,
) -> Result<String, AppError> {
    let ttl = ttl_override.unwrap_or_else(|| kind.default_ttl(config));
    let expires_at = Utc::now() + ttl;

    let mut payload = claims.to_payload();
    payload.insert("exp".to_string(), Value::from(expires_at.timestamp()));
    payload.insert("type".to_string(), Value::from(kind.as_str()));

    encode(
        &Header::new(config.algorithm()?),
        &payload,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Issue an access token with the configured default lifetime
pub fn create_access_token(claims: &ClaimSet, config: &JwtSettings) -> Result<String, AppError> {
    issue_token(claims, TokenKind::Access, None, config)
}

/// Issue a refresh token with the configured default lifetime
pub fn create_refresh_token(claims: &ClaimSet, config: &JwtSettings) -> Result<String, AppError> {
    issue_token(claims, TokenKind::Refresh, None, config)
}

/// Validate a presented token and return its claims
///
/// Checks, in order: signature, declared kind against `expected_kind`,
/// expiry presence, expiry well-formedness, expiry against the current UTC
/// instant. A stray `Bearer ` transport prefix is stripped (and logged)
/// before decoding.
///
/// Returns `None` for every rejection. The reason is logged at warn but is
/// deliberately not part of the return value.
pub fn validate_token(
    token: &str,
    expected_kind: TokenKind,
    config: &JwtSettings,
) -> Option<TokenClaims> {
    match validate_token_at(token, expected_kind, config, Utc::now()) {
        Ok(claims) => Some(claims),
        Err(reason) => {
            tracing::warn!(
                token = %redact(token),
                expected_kind = %expected_kind,
                reason = %reason,
                "token rejected"
            );
            None
        }
    }
}

/// Validation against an explicit clock. `validate_token` passes `Utc::now()`;
/// tests pass a fixed instant.
fn validate_token_at(
    token: &str,
    expected_kind: TokenKind,
    config: &JwtSettings,
    now: DateTime<Utc>,
) -> Result<TokenClaims, AuthError> {
    // A well-formed client sends the bare token; tolerate the header scheme
    // leaking through, but record that it happened
    let token = match token.strip_prefix(BEARER_PREFIX) {
        Some(stripped) => {
            tracing::warn!(token = %redact(stripped), "bearer prefix found in token and removed");
            stripped
        }
        None => token,
    };

    let algorithm = config
        .algorithm()
        .map_err(|e| AuthError::SignatureInvalid(e.to_string()))?;

    // Expiry is checked by hand below so that missing, malformed, and past
    // expiries stay distinguishable in the logs
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let decoded = decode::<Value>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AuthError::SignatureInvalid(e.to_string()))?;

    let payload = match decoded.claims {
        Value::Object(map) => map,
        other => {
            return Err(AuthError::ClaimsMalformed(format!(
                "payload is not an object: {}",
                other
            )))
        }
    };

    let found_kind = payload
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if found_kind != expected_kind.as_str() {
        return Err(AuthError::KindMismatch {
            expected: expected_kind.to_string(),
            found: found_kind.to_string(),
        });
    }

    let exp = match payload.get("exp") {
        None => return Err(AuthError::ExpiryMissing),
        Some(value) => value.as_i64().ok_or(AuthError::ExpiryMalformed)?,
    };
    if exp <= now.timestamp() {
        return Err(AuthError::Expired);
    }

    serde_json::from_value(Value::Object(payload))
        .map_err(|e| AuthError::ClaimsMalformed(e.to_string()))
}

/// Decode a token's claims WITHOUT verifying its signature or expiry
///
/// For diagnostic tooling only (inspecting what a reported-bad token
/// actually carries). Must never feed an authentication decision; use
/// `validate_token` for that.
pub fn decode_token_unverified(token: &str, config: &JwtSettings) -> Option<Map<String, Value>> {
    let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token);

    let mut validation = Validation::new(config.algorithm().ok()?);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .and_then(|data| match data.claims {
            Value::Object(map) => Some(map),
            _ => None,
        })
}
