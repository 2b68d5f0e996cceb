//! Registration, login, logout and token refresh.

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};
use tracing::{info, warn};

use crate::auth::{AuthError, AuthenticatedUser, RefreshUser, TokenType};
use crate::db::{queries, UserRecord};
use crate::models::{
    AccessTokenResponse, ApiResponse, AuthTokensResponse, LoginRequest, RegisterUserRequest,
};
use crate::AppState;

use super::validation_error;

/// Issue an access/refresh pair for a user.
fn issue_tokens(state: &AppState, user: &UserRecord) -> Result<AuthTokensResponse, AuthError> {
    Ok(AuthTokensResponse {
        access_token: state.tokens.issue(&user.email, TokenType::Access)?,
        refresh_token: state.tokens.issue(&user.email, TokenType::Refresh)?,
        user_id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role_name: user.role_name.clone(),
    })
}

/// Revoke the presented token's `jti`.
async fn revoke(state: &AppState, jti: &str, email: &str) -> HttpResponse {
    match queries::revoke_token(state.db.pool(), jti).await {
        Ok(()) => {
            info!("User {} logged out", email);
            HttpResponse::Ok().json(ApiResponse::message("Logged out successfully"))
        }
        Err(e) => AuthError::Database(e).error_response(),
    }
}

/// Register a new account.
///
/// ## Endpoint
///
/// `POST /api/v1/auth/register-user`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/v1/auth/register-user \
///   -H "Content-Type: application/json" \
///   -d '{"email":"ada@example.com","password":"correct-horse","name":"Ada"}'
/// ```
///
/// Returns 201 with an access and a refresh token, 409 if the email is taken.
pub async fn register_user(
    state: web::Data<Arc<AppState>>,
    body: web::Json<RegisterUserRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("Register request for: {}", body.email);

    let user = match state.accounts.register_user(body.into_inner()).await {
        Ok(user) => user,
        Err(e) => {
            warn!("Registration failed: {}", e);
            return e.error_response();
        }
    };

    match issue_tokens(&state, &user) {
        Ok(tokens) => HttpResponse::Created()
            .json(ApiResponse::success("User registered successfully", tokens)),
        Err(e) => e.error_response(),
    }
}

/// Log in with email and password.
///
/// ## Endpoint
///
/// `POST /api/v1/auth/login`
///
/// 404 for an unknown email, 401 for a wrong password, 403 when the
/// account is disabled.
pub async fn login(state: web::Data<Arc<AppState>>, body: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    let user = match state.accounts.authenticate(&body.email, &body.password).await {
        Ok(user) => user,
        Err(e) => {
            warn!("Login failed for {}: {}", body.email, e);
            return e.error_response();
        }
    };

    match issue_tokens(&state, &user) {
        Ok(tokens) => HttpResponse::Ok().json(ApiResponse::success("Login successful", tokens)),
        Err(e) => e.error_response(),
    }
}

/// Revoke the access token used for this request.
///
/// `DELETE /api/v1/auth/logout`
pub async fn logout(state: web::Data<Arc<AppState>>, auth: AuthenticatedUser) -> HttpResponse {
    revoke(&state, &auth.claims.jti, &auth.user.email).await
}

/// Revoke the refresh token used for this request.
///
/// `DELETE /api/v1/auth/logout/refresh`
pub async fn logout_refresh(state: web::Data<Arc<AppState>>, auth: RefreshUser) -> HttpResponse {
    revoke(&state, &auth.claims.jti, &auth.user.email).await
}

/// Trade a refresh token for a new access token.
///
/// `POST /api/v1/auth/refresh`
pub async fn refresh(state: web::Data<Arc<AppState>>, auth: RefreshUser) -> HttpResponse {
    match state.tokens.issue(&auth.user.email, TokenType::Access) {
        Ok(access_token) => HttpResponse::Ok().json(ApiResponse::success(
            "Access token refreshed",
            AccessTokenResponse { access_token },
        )),
        Err(e) => e.error_response(),
    }
}
