//! Health check.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::warn;

use crate::models::{ApiResponse, HealthResponse};
use crate::AppState;

/// Health check endpoint.
///
/// Check if the backend is running and can reach its database.
///
/// ## Endpoint
///
/// `GET /api/v1/healthz/status`
///
/// ## Example
///
/// ```bash
/// curl http://127.0.0.1:8080/api/v1/healthz/status
/// ```
///
/// ## Response
///
/// ```json
/// {
///     "success": true,
///     "message": "Service is healthy",
///     "data": {
///         "status": "healthy",
///         "database": true,
///         "version": "0.1.0",
///         "timestamp": "2026-01-15T12:00:00Z"
///     }
/// }
/// ```
///
/// Returns 503 with `"status": "unhealthy"` when the database is down.
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_healthy = match state.db.client().await {
        Ok(client) => client.query_one("SELECT 1", &[]).await.is_ok(),
        Err(e) => {
            warn!("Health check could not reach database: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let (status_code, message) = if db_healthy {
        (StatusCode::OK, "Service is healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Service is unhealthy")
    };

    HttpResponse::build(status_code).json(ApiResponse {
        success: db_healthy,
        message: message.to_string(),
        data: Some(response),
        code: None,
    })
}
