//! Currency listing.

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};

use crate::auth::AuthenticatedUser;
use crate::models::{ApiResponse, CurrencyResponse};
use crate::AppState;

/// `GET /api/v1/currency/all`
pub async fn list_currencies(_auth: AuthenticatedUser, state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.accounts.list_currencies().await {
        Ok(currencies) => {
            let currencies: Vec<CurrencyResponse> =
                currencies.into_iter().map(CurrencyResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(
                "Currencies retrieved successfully",
                currencies,
            ))
        }
        Err(e) => e.error_response(),
    }
}
