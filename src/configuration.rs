use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::error::{AppError, ConfigError};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub jwt: JwtSettings,
}

/// JWT authentication settings
///
/// Loaded once at startup and read-only for the lifetime of the process.
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
}

impl JwtSettings {
    /// Parse the configured algorithm name.
    ///
    /// # Errors
    /// Returns error if the name is not a supported JWT algorithm.
    pub fn algorithm(&self) -> Result<Algorithm, AppError> {
        Algorithm::from_str(&self.algorithm).map_err(|_| {
            AppError::Config(ConfigError::InvalidValue(format!(
                "unsupported JWT algorithm: {}",
                self.algorithm
            )))
        })
    }

    /// Default access token lifetime.
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_expire_minutes)
    }

    /// Default refresh token lifetime.
    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_token_expire_days)
    }
}

/// Load settings from the optional `configuration` file and the environment.
///
/// Environment variables use the `APP` prefix with `__` separators, e.g.
/// `APP_JWT__SECRET`. A missing or empty signing secret is fatal: a process
/// that cannot sign tokens must not start.
pub fn get_configuration() -> Result<Settings, AppError> {
    let settings = config::Config::builder()
        .set_default("jwt.algorithm", "HS256")?
        .set_default("jwt.access_token_expire_minutes", 30i64)?
        .set_default("jwt.refresh_token_expire_days", 7i64)?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;
    let settings = settings.try_deserialize::<Settings>()?;

    if settings.jwt.secret.trim().is_empty() {
        return Err(AppError::Config(ConfigError::MissingRequired(
            "jwt.secret".to_string(),
        )));
    }
    // Reject a bad algorithm name at startup, not on the first request
    settings.jwt.algorithm()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_settings() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        }
    }

    #[test]
    fn test_algorithm_parsing() {
        let settings = get_test_settings();
        assert_eq!(settings.algorithm().expect("Failed to parse"), Algorithm::HS256);
    }

    #[test]
    fn test_unsupported_algorithm_is_rejected() {
        let mut settings = get_test_settings();
        settings.algorithm = "none".to_string();
        assert!(settings.algorithm().is_err());
    }

    #[test]
    fn test_token_ttls() {
        let settings = get_test_settings();
        assert_eq!(settings.access_token_ttl(), chrono::Duration::minutes(30));
        assert_eq!(settings.refresh_token_ttl(), chrono::Duration::days(7));
    }
}
