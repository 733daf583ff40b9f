/// Authentication core
///
/// Credential verification against stored password hashes and JWT
/// access/refresh token issuance and validation.

mod claims;
mod jwt;
mod password;

pub use claims::ClaimSet;
pub use claims::TokenClaims;
pub use claims::TokenKind;
pub use jwt::create_access_token;
pub use jwt::create_refresh_token;
pub use jwt::decode_token_unverified;
pub use jwt::issue_token;
pub use jwt::validate_token;
pub use password::hash_password;
pub use password::verify_password;
pub use password::HashScheme;
