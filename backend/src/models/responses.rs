//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//! All responses are wrapped in a standard format.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{CurrencyRecord, RoleRecord, TransactionRecord, UserRecord, WalletRecord};
use crate::services::ledger::to_major_units;
use crate::utils::format_amount;

/// Standard API response wrapper.
///
/// Every body carries a `message`, success or not.
///
/// ## Success Response
///
/// ```json
/// {
///     "success": true,
///     "message": "Wallet credited successfully",
///     "data": { ... }
/// }
/// ```
///
/// ## Error Response
///
/// ```json
/// {
///     "success": false,
///     "message": "You have insufficient funds",
///     "code": "INSUFFICIENT_FUNDS"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,

    /// Human-readable outcome.
    pub message: String,

    /// Response data (absent on error and on message-only replies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Machine-readable error code (absent on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            code: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response that only carries a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            code: None,
        }
    }

    /// Create an error response.
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code: Some(code.to_string()),
        }
    }
}

/// Tokens handed out by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role_name: String,
}

/// Fresh access token from `/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// User as shown to clients. No password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub profile_photo: Option<String>,
    pub last_login_date: Option<DateTime<Utc>>,
    pub role: String,
    pub is_disabled: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            telephone: user.telephone,
            profile_photo: user.profile_photo,
            last_login_date: user.last_login_date,
            role: user.role_name,
            is_disabled: user.is_disabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub role_id: i64,
    pub role_name: String,
}

impl From<RoleRecord> for RoleResponse {
    fn from(role: RoleRecord) -> Self {
        Self {
            role_id: role.id,
            role_name: role.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyResponse {
    pub currency_id: i64,
    pub currency_code: String,
    pub currency_name: String,

    /// Decimal places in amounts of this currency.
    pub exponent: u32,
}

impl From<CurrencyRecord> for CurrencyResponse {
    fn from(currency: CurrencyRecord) -> Self {
        Self {
            currency_id: currency.id,
            currency_code: currency.currency_code,
            currency_name: currency.currency_name,
            exponent: currency.exponent,
        }
    }
}

/// Wallet balance response.
///
/// Returned by `GET /api/v1/transaction/wallet?user_id=7`
///
/// ## Example Response
///
/// ```json
/// {
///     "success": true,
///     "message": "Wallet details retrieved successfully",
///     "data": {
///         "user_id": 7,
///         "amount": 1250.0,
///         "formatted_amount": "1,250.00 USD",
///         "currency": "USD",
///         "currency_id": 1,
///         "updated_at": "2026-01-15T12:00:00Z"
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    pub user_id: i64,

    /// Balance in major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Human-readable balance (e.g., "1,250.00 USD").
    pub formatted_amount: String,

    /// Currency code.
    pub currency: String,

    pub currency_id: i64,

    pub updated_at: DateTime<Utc>,
}

impl From<WalletRecord> for WalletResponse {
    fn from(wallet: WalletRecord) -> Self {
        Self {
            user_id: wallet.user_id,
            amount: to_major_units(wallet.amount, wallet.currency_exponent),
            formatted_amount: format_amount(
                wallet.amount,
                wallet.currency_exponent,
                &wallet.currency_code,
            ),
            currency: wallet.currency_code,
            currency_id: wallet.currency_id,
            updated_at: wallet.updated_at,
        }
    }
}

/// Both wallets after a transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    /// Amount moved, major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub source: WalletResponse,
    pub target: WalletResponse,
}

/// Transaction record response.
///
/// Returned in transaction history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: Uuid,

    /// credit, debit, transfer_in or transfer_out.
    pub transaction_type: String,

    /// Amount in major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance_after: Decimal,

    /// Other side of a transfer.
    pub counterparty_user_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl TransactionResponse {
    /// Render a history row in the wallet currency's major units.
    pub fn new(tx: TransactionRecord, exponent: u32) -> Self {
        Self {
            id: tx.id,
            transaction_type: tx.transaction_type,
            amount: to_major_units(tx.amount, exponent),
            balance_after: to_major_units(tx.balance_after, exponent),
            counterparty_user_id: tx.counterparty_user_id,
            created_at: tx.created_at,
        }
    }
}

/// Transaction list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,

    /// Total number of transactions for the user.
    pub total: i64,

    pub page: i64,

    pub limit: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status: "healthy" or "unhealthy".
    pub status: String,

    /// Database connection status.
    pub database: bool,

    /// Service version.
    pub version: String,

    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TransactionType;

    #[test]
    fn test_error_envelope_has_message_and_code() {
        let body = serde_json::to_value(ApiResponse::error("NOT_FOUND", "User does not exist")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User does not exist");
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_success_envelope_omits_code() {
        let body = serde_json::to_value(ApiResponse::success("ok", RoleResponse {
            role_id: 1,
            role_name: "Admin".to_string(),
        }))
        .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["role_name"], "Admin");
        assert!(body.get("code").is_none());
    }

    #[test]
    fn test_wallet_response_formats_amount() {
        let wallet = WalletRecord {
            id: 4,
            user_id: 7,
            currency_id: 1,
            currency_code: "USD".to_string(),
            currency_exponent: 2,
            amount: 125_050,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response = WalletResponse::from(wallet);
        assert_eq!(response.formatted_amount, "1,250.50 USD");
        assert_eq!(response.amount, Decimal::new(125_050, 2));
        assert_eq!(response.currency, "USD");
        assert_eq!(response.user_id, 7);

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["amount"], 1250.5);
    }

    #[test]
    fn test_wallet_without_minor_unit() {
        let wallet = WalletRecord {
            id: 5,
            user_id: 8,
            currency_id: 7,
            currency_code: "JPY".to_string(),
            currency_exponent: 0,
            amount: 1_000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response = WalletResponse::from(wallet);
        assert_eq!(response.formatted_amount, "1,000 JPY");
        assert_eq!(response.amount, Decimal::from(1_000));

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["amount"], 1000.0);
    }

    #[test]
    fn test_history_row_in_major_units() {
        let record = TransactionRecord::new(7, TransactionType::Debit, 1_050, 8_950, None);
        let response = TransactionResponse::new(record, 2);

        assert_eq!(response.transaction_type, "debit");
        assert_eq!(response.amount, Decimal::new(1_050, 2));

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["amount"], 10.5);
        assert_eq!(body["balance_after"], 89.5);
    }
}
