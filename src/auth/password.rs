/// Password Hashing and Verification
///
/// Fail-closed credential verification against stored hashes, tolerant of
/// legacy hash formats inherited from earlier storage schemes: anything the
/// verifier does not recognize is a non-match, never an error.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, AuthError};

/// Hashing scheme declared by a stored hash's own prefix.
///
/// Stored credentials are self-describing; verification dispatches on the
/// scheme tag. `Unknown` always verifies to "no match", so rows written by a
/// prior system can sit in the user store without breaking the login path.
/// Supporting a new scheme means adding an arm here; callers never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Bcrypt,
    Unknown,
}

impl HashScheme {
    /// Classify a stored hash by its prefix.
    pub fn detect(stored_hash: &str) -> Self {
        const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

        if BCRYPT_PREFIXES.iter().any(|p| stored_hash.starts_with(p)) {
            HashScheme::Bcrypt
        } else {
            HashScheme::Unknown
        }
    }
}

/// First few bytes of a stored hash, for log lines. Never log the full hash.
fn hash_prefix(stored_hash: &str) -> &str {
    let end = stored_hash
        .char_indices()
        .nth(4)
        .map_or(stored_hash.len(), |(i, _)| i);
    &stored_hash[..end]
}

/// Verify a password against its stored hash
///
/// Fail-closed: every ambiguous or unexpected condition is a non-match.
/// - Absent or empty stored hash → `false` without hashing ("no password
///   set" must never mean "any password matches").
/// - Unrecognized hash scheme → `false`, logged at warn.
/// - Verifier fault (corrupt encoding, internal failure) → `false`, logged
///   at error.
///
/// The caller cannot distinguish a wrong password from a broken stored
/// hash; only the logs can.
pub fn verify_password(password: &str, stored_hash: Option<&str>) -> bool {
    let stored_hash = match stored_hash {
        Some(h) if !h.is_empty() => h,
        _ => {
            tracing::debug!(reason = %AuthError::NoCredentialStored, "password rejected");
            return false;
        }
    };

    match HashScheme::detect(stored_hash) {
        HashScheme::Bcrypt => match verify(password, stored_hash) {
            Ok(matched) => matched,
            Err(e) => {
                let reason = AuthError::HashVerificationFault(e.to_string());
                tracing::error!(reason = %reason, "password verification failed unexpectedly");
                false
            }
        },
        HashScheme::Unknown => {
            let reason = AuthError::UnrecognizedHashFormat(hash_prefix(stored_hash).to_string());
            tracing::warn!(reason = %reason, "stored hash uses an unrecognized scheme");
            false
        }
    }
}

/// Hash a password with the current preferred scheme (bcrypt)
///
/// Any input string is hashable, including the empty string.
///
/// # Errors
/// Returns error only on an internal bcrypt fault.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}
