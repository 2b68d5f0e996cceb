//! # JWT Issuing and Verification
//!
//! HS256 tokens signed with `JWT_SECRET`. Two kinds are issued:
//!
//! | Type | Lifetime | Used for |
//! |------|----------|----------|
//! | `access` | `JWT_ACCESS_TTL_MINUTES` | every secured route |
//! | `refresh` | `JWT_REFRESH_TTL_DAYS` | `/auth/refresh`, `/auth/logout/refresh` |
//!
//! Every token carries a random `jti` so it can be revoked on logout.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;

use super::AuthError;

/// Which kind of token a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Registered claims carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// Token id, used for revocation.
    pub jti: String,
    pub typ: TokenType,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with one shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::minutes(config.jwt_access_ttl_minutes),
            Duration::days(config.jwt_refresh_ttl_days),
        )
    }

    /// Sign a new token of the given type for `email`.
    pub fn issue(&self, email: &str, token_type: TokenType) -> Result<String, AuthError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature, expiry and type, and return the claims.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.typ != expected {
            return Err(AuthError::WrongTokenType {
                expected,
                found: claims.typ,
            });
        }

        Ok(claims)
    }
}
