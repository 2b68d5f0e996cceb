//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint,
//! one file per resource. Each handler:
//! 1. Authenticates the caller (extractor argument)
//! 2. Extracts and validates request data
//! 3. Calls the appropriate service
//! 4. Returns a formatted response
//!
//! ## Error Handling
//!
//! Service errors render themselves through `ResponseError`; handlers
//! log and forward them. Validation failures become a 400:
//!
//! ```json
//! {
//!     "success": false,
//!     "message": "amount must be greater than 0",
//!     "code": "VALIDATION_ERROR"
//! }
//! ```

pub mod auth;
pub mod currency;
pub mod health;
pub mod role;
pub mod user;
pub mod wallet;

use actix_web::{HttpRequest, HttpResponse};

use crate::models::ApiResponse;

/// 400 response for a request that failed `validate()`.
pub(crate) fn validation_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error("VALIDATION_ERROR", message))
}

/// Fallback for unknown paths under `/api/v1`.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(
        "NOT_FOUND",
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
