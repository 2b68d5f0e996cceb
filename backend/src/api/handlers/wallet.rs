//! Wallet balance, credit, debit, transfer and history.
//!
//! Any authenticated caller may act on any user's wallet; the target is
//! always named in the query string.

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::models::{
    ApiResponse, OpenWalletRequest, TransactionListResponse, TransactionQuery, TransactionResponse,
    TransferQuery, TransferResponse, UserIdQuery, WalletAmountRequest, WalletResponse,
};
use crate::AppState;

use super::validation_error;

/// Get a user's wallet balance.
///
/// ## Endpoint
///
/// `GET /api/v1/transaction/wallet?user_id=7`
///
/// ## Example
///
/// ```bash
/// curl http://127.0.0.1:8080/api/v1/transaction/wallet?user_id=7 \
///   -H "Authorization: Bearer $ACCESS_TOKEN"
/// ```
pub async fn get_wallet(
    _auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    match state.wallets.get_wallet(query.user_id).await {
        Ok(wallet) => HttpResponse::Ok().json(ApiResponse::success(
            "Wallet details retrieved successfully",
            WalletResponse::from(wallet),
        )),
        Err(e) => e.error_response(),
    }
}

/// Open an empty wallet.
///
/// ## Endpoint
///
/// `POST /api/v1/transaction/wallet?user_id=7`
///
/// ```json
/// { "currency_id": 1 }
/// ```
///
/// 409 if the user already has a wallet.
pub async fn open_wallet(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
    body: web::Json<OpenWalletRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} opens a wallet for user {}", auth.user.email, query.user_id);

    match state.wallets.open_wallet(query.user_id, body.currency_id).await {
        Ok(wallet) => HttpResponse::Created().json(ApiResponse::success(
            "Wallet created successfully",
            WalletResponse::from(wallet),
        )),
        Err(e) => {
            warn!("Open wallet for user {} failed: {}", query.user_id, e);
            e.error_response()
        }
    }
}

/// Add money to a wallet.
///
/// ## Endpoint
///
/// `PUT /api/v1/transaction/wallet?user_id=7`
///
/// ```json
/// { "amount": 25.00 }
/// ```
pub async fn credit_wallet(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
    body: web::Json<WalletAmountRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} credits {} to user {}", auth.user.email, body.amount, query.user_id);

    match state.wallets.credit(query.user_id, body.amount, body.currency_id).await {
        Ok(wallet) => HttpResponse::Ok().json(ApiResponse::success(
            "Wallet credited successfully",
            WalletResponse::from(wallet),
        )),
        Err(e) => {
            warn!("Credit for user {} failed: {}", query.user_id, e);
            e.error_response()
        }
    }
}

/// Take money from a wallet.
///
/// ## Endpoint
///
/// `DELETE /api/v1/transaction/wallet?user_id=7`
///
/// ```json
/// { "amount": 25.00 }
/// ```
///
/// 406 when the balance does not cover the amount.
pub async fn debit_wallet(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
    body: web::Json<WalletAmountRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} debits {} from user {}", auth.user.email, body.amount, query.user_id);

    match state.wallets.debit(query.user_id, body.amount, body.currency_id).await {
        Ok(wallet) => HttpResponse::Ok().json(ApiResponse::success(
            "Wallet debited successfully",
            WalletResponse::from(wallet),
        )),
        Err(e) => {
            warn!("Debit for user {} failed: {}", query.user_id, e);
            e.error_response()
        }
    }
}

/// Move money between two users.
///
/// ## Endpoint
///
/// `PUT /api/v1/transaction/transfer?current_user_id=7&target_user_id=9`
///
/// ```json
/// { "amount": 10.00 }
/// ```
///
/// ## Response
///
/// ```json
/// {
///     "success": true,
///     "message": "Transfer completed successfully",
///     "data": {
///         "amount": 10.0,
///         "source": { "user_id": 7, "amount": 40.0, ... },
///         "target": { "user_id": 9, "amount": 10.0, ... }
///     }
/// }
/// ```
pub async fn transfer(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<TransferQuery>,
    body: web::Json<WalletAmountRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!(
        "{} transfers {} from user {} to user {}",
        auth.user.email, body.amount, query.current_user_id, query.target_user_id
    );

    match state
        .wallets
        .transfer(query.current_user_id, query.target_user_id, body.amount, body.currency_id)
        .await
    {
        Ok((source, target)) => HttpResponse::Ok().json(ApiResponse::success(
            "Transfer completed successfully",
            TransferResponse {
                amount: body.amount,
                source: WalletResponse::from(source),
                target: WalletResponse::from(target),
            },
        )),
        Err(e) => {
            warn!(
                "Transfer {} -> {} failed: {}",
                query.current_user_id, query.target_user_id, e
            );
            e.error_response()
        }
    }
}

/// Get a user's transaction history, newest first.
///
/// ## Endpoint
///
/// `GET /api/v1/transaction/record?user_id=7&page=1&limit=20`
pub async fn list_transactions(
    _auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<TransactionQuery>,
) -> HttpResponse {
    match state
        .wallets
        .list_transactions(query.user_id, query.page, query.limit)
        .await
    {
        Ok(page) => HttpResponse::Ok().json(ApiResponse::success(
            "Transactions retrieved successfully",
            TransactionListResponse {
                transactions: page
                    .transactions
                    .into_iter()
                    .map(|tx| TransactionResponse::new(tx, page.currency_exponent))
                    .collect(),
                total: page.total,
                page: page.page,
                limit: page.limit,
            },
        )),
        Err(e) => e.error_response(),
    }
}
