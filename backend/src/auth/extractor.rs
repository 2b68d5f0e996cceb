//! Bearer-token extractors.
//!
//! Add [`AuthenticatedUser`] to a handler's arguments to require an
//! access token, or [`RefreshUser`] to require a refresh token:
//!
//! ```rust,ignore
//! pub async fn get_wallet(auth: AuthenticatedUser, ...) -> HttpResponse { ... }
//! ```

use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::db::{queries, UserRecord};
use crate::utils::truncate_string;
use crate::AppState;

use super::{AuthError, Claims, TokenType};

/// Caller authenticated with an access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: UserRecord,
    pub claims: Claims,
}

/// Caller authenticated with a refresh token.
#[derive(Debug, Clone)]
pub struct RefreshUser {
    pub user: UserRecord,
    pub claims: Claims,
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    Ok(token.to_string())
}

async fn resolve(req: HttpRequest, expected: TokenType) -> Result<(UserRecord, Claims), AuthError> {
    let token = bearer_token(&req)?;

    let state = req
        .app_data::<web::Data<Arc<AppState>>>()
        .ok_or(AuthError::MissingState)?;

    let claims = state.tokens.verify(&token, expected).map_err(|e| {
        debug!("Rejected {} token {}: {}", expected, truncate_string(&token, 20), e);
        e
    })?;

    if queries::is_token_revoked(state.db.pool(), &claims.jti).await? {
        warn!("Revoked token presented for {}", claims.sub);
        return Err(AuthError::Revoked);
    }

    let user = queries::get_user_by_email(state.db.pool(), &claims.sub)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    if user.is_disabled {
        return Err(AuthError::Disabled);
    }

    Ok((user, claims))
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let (user, claims) = resolve(req, TokenType::Access).await?;
            Ok(AuthenticatedUser { user, claims })
        })
    }
}

impl FromRequest for RefreshUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let (user, claims) = resolve(req, TokenType::Refresh).await?;
            Ok(RefreshUser { user, claims })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let none = TestRequest::default().to_http_request();
        assert!(matches!(bearer_token(&none), Err(AuthError::MissingToken)));

        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(matches!(bearer_token(&basic), Err(AuthError::MissingToken)));

        let empty = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert!(matches!(bearer_token(&empty), Err(AuthError::MissingToken)));
    }
}
