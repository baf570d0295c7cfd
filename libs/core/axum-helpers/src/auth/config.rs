//! Signing configuration for [`JwtAuth`](super::JwtAuth).

use core_config::{ConfigError, FromEnv, env_parse_or_default};
use std::env;

use super::jwt::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL};

/// Minimum secret length accepted for HS256 signing.
pub const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, `SECRET_KEY` accepted as a fallback) - at least 32 characters
/// - `JWT_ACCESS_TTL_SECS` (optional, default: 900)
/// - `JWT_REFRESH_TTL_SECS` (optional, default: 2592000)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and default lifetimes.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            access_ttl_secs: ACCESS_TOKEN_TTL,
            refresh_ttl_secs: REFRESH_TOKEN_TTL,
        }
    }

    pub fn with_ttls(mut self, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        self.access_ttl_secs = access_ttl_secs;
        self.refresh_ttl_secs = refresh_ttl_secs;
        self
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish()
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("SECRET_KEY"))
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let access_ttl_secs =
            env_parse_or_default("JWT_ACCESS_TTL_SECS", &ACCESS_TOKEN_TTL.to_string())?;
        let refresh_ttl_secs =
            env_parse_or_default("JWT_REFRESH_TTL_SECS", &REFRESH_TOKEN_TTL.to_string())?;

        Ok(Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(SECRET);
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.access_ttl_secs, ACCESS_TOKEN_TTL);
        assert_eq!(config.refresh_ttl_secs, REFRESH_TOKEN_TTL);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_ACCESS_TTL_SECS", None),
                ("JWT_REFRESH_TTL_SECS", None),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.access_ttl_secs, 900);
                assert_eq!(config.refresh_ttl_secs, 2_592_000);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_secret_key_fallback() {
        temp_env::with_vars(
            [("JWT_SECRET", None), ("SECRET_KEY", Some(SECRET))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_custom_ttls() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_ACCESS_TTL_SECS", Some("60")),
                ("JWT_REFRESH_TTL_SECS", Some("3600")),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.access_ttl_secs, 60);
                assert_eq!(config.refresh_ttl_secs, 3600);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_vars_unset(["JWT_SECRET", "SECRET_KEY"], || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", JwtConfig::new(SECRET));
        assert!(!rendered.contains(SECRET));
    }
}
