//! # Authentication Module
//!
//! Password hashing, token issuing and the bearer-token extractors that
//! guard every secured route.
//!
//! ## Request Flow
//!
//! ```text
//! Authorization: Bearer <jwt>
//!          │
//!          ▼
//! ┌──────────────────┐   401 missing / malformed header
//! │ parse header     │──────────────────────────────────►
//! └──────────────────┘
//!          ▼
//! ┌──────────────────┐   401 bad signature / expired / wrong type
//! │ TokenIssuer      │──────────────────────────────────►
//! │   .verify()      │
//! └──────────────────┘
//!          ▼
//! ┌──────────────────┐   401 revoked
//! │ revoked_tokens   │──────────────────────────────────►
//! └──────────────────┘
//!          ▼
//! ┌──────────────────┐   401 user gone, 403 disabled
//! │ users            │──────────────────────────────────►
//! └──────────────────┘
//!          ▼
//!   handler runs
//! ```

pub mod extractor;
pub mod jwt;
pub mod password;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::db::DatabaseError;
use crate::models::ApiResponse;

pub use extractor::{AuthenticatedUser, RefreshUser};
pub use jwt::{Claims, TokenIssuer, TokenType};
pub use password::{hash_password_blocking, verify_password_blocking};

/// Errors raised while authenticating a request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header with a Bearer token is required")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Expected a {expected} token, got a {found} token")]
    WrongTokenType { expected: TokenType, found: TokenType },

    #[error("Token has been revoked")]
    Revoked,

    #[error("User no longer exists")]
    UnknownUser,

    #[error("Account is disabled")]
    Disabled,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Application state is not configured")]
    MissingState,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl AuthError {
    fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken(_) | AuthError::WrongTokenType { .. } => "INVALID_TOKEN",
            AuthError::Revoked => "TOKEN_REVOKED",
            AuthError::UnknownUser => "UNAUTHORIZED",
            AuthError::Disabled => "ACCOUNT_DISABLED",
            AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::MissingState
            | AuthError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::WrongTokenType { .. }
            | AuthError::Revoked
            | AuthError::UnknownUser => StatusCode::UNAUTHORIZED,
            AuthError::Disabled => StatusCode::FORBIDDEN,
            AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::MissingState
            | AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Authentication failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ApiResponse::error(self.code(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Revoked.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UnknownUser.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Disabled.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Hashing("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_rt::test]
    async fn test_server_errors_hide_details() {
        let response = AuthError::Signing("key material exploded".to_string()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Internal server error");
        assert!(!body.windows(8).any(|w| w == b"exploded"));
    }
}
