use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Default token lifetimes in seconds
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 2_592_000; // 30 days

/// Which gate a token opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (admin id)
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    pub token_type: TokenType,
}

impl JwtClaims {
    /// Parse the subject back into the id type it was issued for.
    pub fn subject_as<T: FromStr>(&self) -> Option<T> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("expected a {expected:?} token but got a {found:?} token")]
    WrongType { expected: TokenType, found: TokenType },
}

/// Stateless HS256 token issuer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            access_ttl_secs = config.access_ttl_secs,
            refresh_ttl_secs = config.refresh_ttl_secs,
            "JWT auth initialized"
        );

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    pub fn create_access_token(&self, subject: &str) -> Result<String, TokenError> {
        self.create_token(subject, TokenType::Access, self.access_ttl_secs)
    }

    pub fn create_refresh_token(&self, subject: &str) -> Result<String, TokenError> {
        self.create_token(subject, TokenType::Refresh, self.refresh_ttl_secs)
    }

    fn create_token(
        &self,
        subject: &str,
        token_type: TokenType,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    /// Verify signature and expiry and decode claims, whatever the token type.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, TokenError> {
        let token_data = decode::<JwtClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(TokenError::Invalid)?;

        Ok(token_data.claims)
    }

    /// Verify a token and require it to be of `expected` type.
    pub fn verify_token_of_type(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<JwtClaims, TokenError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            return Err(TokenError::WrongType {
                expected,
                found: claims.token_type,
            });
        }
        Ok(claims)
    }
}
