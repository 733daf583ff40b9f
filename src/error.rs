/// Error Handling Module
///
/// Domain-specific error types for the authentication core plus the unified
/// application error. Every authentication rejection collapses to a
/// `bool`/`Option` at the public boundary; the enums here exist so each
/// rejection path stays distinguishable in the logs.

use std::error::Error as StdError;
use std::fmt;

/// Authentication rejection reasons.
///
/// Never returned across the public contract: callers see only "invalid".
/// Used for diagnostic logging, where "expired" must stay distinguishable
/// from "tampered" even though the caller cannot tell them apart.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No stored credential for the identity; nothing to verify against
    NoCredentialStored,
    /// Stored hash prefix does not match any known hashing scheme
    UnrecognizedHashFormat(String),
    /// The hashing library failed in an unexpected way
    HashVerificationFault(String),
    /// Token failed to decode or its signature did not verify
    SignatureInvalid(String),
    /// Token kind claim does not match what the endpoint expects
    KindMismatch { expected: String, found: String },
    /// Token carries no expiry claim
    ExpiryMissing,
    /// Expiry claim is not a valid Unix timestamp
    ExpiryMalformed,
    /// Token expiry is in the past
    Expired,
    /// Signed payload does not decode into the expected claim shape
    ClaimsMalformed(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NoCredentialStored => write!(f, "no credential stored"),
            AuthError::UnrecognizedHashFormat(prefix) => {
                write!(f, "unrecognized hash format (prefix: {})", prefix)
            }
            AuthError::HashVerificationFault(msg) => {
                write!(f, "hash verification fault: {}", msg)
            }
            AuthError::SignatureInvalid(msg) => write!(f, "signature invalid: {}", msg),
            AuthError::KindMismatch { expected, found } => {
                write!(f, "token kind mismatch (expected {}, found {})", expected, found)
            }
            AuthError::ExpiryMissing => write!(f, "expiry claim missing"),
            AuthError::ExpiryMalformed => write!(f, "expiry claim is not a valid timestamp"),
            AuthError::Expired => write!(f, "token has expired"),
            AuthError::ClaimsMalformed(msg) => write!(f, "claims malformed: {}", msg),
        }
    }
}

impl StdError for AuthError {}

/// Configuration errors
///
/// These are fatal at startup: a process without a signing secret must not
/// come up and silently reject everything.
#[derive(Debug)]
pub enum ConfigError {
    MissingRequired(String),
    InvalidValue(String),
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired(msg) => write!(f, "Missing required config: {}", msg),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl StdError for ConfigError {}

/// Central error type that all application errors map to
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Config(ConfigError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(ConfigError::ParseError(err.to_string()))
    }
}
