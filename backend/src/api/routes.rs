//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::ApiResponse;

use super::handlers;

/// Turn a malformed JSON body into the standard error envelope.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected body on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error("INVALID_BODY", err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Turn a malformed query string into the standard error envelope.
fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected query on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error("INVALID_QUERY", err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Configure all API routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /api/v1
/// ├── /healthz/status          GET
/// ├── /auth
/// │   ├── /register-user       POST
/// │   ├── /login               POST
/// │   ├── /logout              DELETE (access token)
/// │   ├── /logout/refresh      DELETE (refresh token)
/// │   └── /refresh             POST   (refresh token)
/// ├── /user                    GET POST PUT DELETE  ?user_id=
/// │   └── /all                 GET                  ?page=&limit=
/// ├── /role                    GET POST PUT DELETE  ?role_id=
/// │   └── /all                 GET                  ?page=&limit=
/// ├── /currency/all            GET
/// └── /transaction
///     ├── /wallet              GET POST PUT DELETE  ?user_id=
///     ├── /transfer            PUT                  ?current_user_id=&target_user_id=
///     └── /record              GET                  ?user_id=&page=&limit=
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))

            // Health check endpoint
            .route("/healthz/status", web::get().to(handlers::health::health_check))

            // Authentication
            .service(
                web::scope("/auth")
                    .route("/register-user", web::post().to(handlers::auth::register_user))
                    .route("/login", web::post().to(handlers::auth::login))
                    .route("/logout", web::delete().to(handlers::auth::logout))
                    .route("/logout/refresh", web::delete().to(handlers::auth::logout_refresh))
                    .route("/refresh", web::post().to(handlers::auth::refresh)),
            )

            // Users
            .service(
                web::scope("/user")
                    .route("/all", web::get().to(handlers::user::list_users))
                    .route("", web::get().to(handlers::user::get_user))
                    .route("", web::post().to(handlers::user::create_user))
                    .route("", web::put().to(handlers::user::update_user))
                    .route("", web::delete().to(handlers::user::delete_user)),
            )

            // Roles
            .service(
                web::scope("/role")
                    .route("/all", web::get().to(handlers::role::list_roles))
                    .route("", web::get().to(handlers::role::get_role))
                    .route("", web::post().to(handlers::role::create_role))
                    .route("", web::put().to(handlers::role::update_role))
                    .route("", web::delete().to(handlers::role::delete_role)),
            )

            // Currencies
            .route("/currency/all", web::get().to(handlers::currency::list_currencies))

            // Wallets and history
            .service(
                web::scope("/transaction")
                    .route("/wallet", web::get().to(handlers::wallet::get_wallet))
                    .route("/wallet", web::post().to(handlers::wallet::open_wallet))
                    .route("/wallet", web::put().to(handlers::wallet::credit_wallet))
                    .route("/wallet", web::delete().to(handlers::wallet::debit_wallet))
                    .route("/transfer", web::put().to(handlers::wallet::transfer))
                    .route("/record", web::get().to(handlers::wallet::list_transactions)),
            )

            .default_service(web::to(handlers::not_found)),
    );
}
