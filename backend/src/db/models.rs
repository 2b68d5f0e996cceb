//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! Each struct represents a row in a table.
//!
//! ## Table Overview
//!
//! | Table | Description |
//! |-------|-------------|
//! | `roles` | Access-tier labels |
//! | `users` | User accounts |
//! | `currency` | ISO currencies a wallet can hold |
//! | `wallets` | One balance per user |
//! | `transactions` | Every balance mutation |
//! | `revoked_tokens` | Blacklisted JWT identifiers |
//!
//! ## Relationship Diagram
//!
//! ```text
//! ┌─────────┐      ┌──────────────┐      ┌──────────────────┐
//! │  roles  │─────<│    users     │─────<│   transactions   │
//! │         │      │              │      │                  │
//! │ id (PK) │      │ role_id (FK) │      │ user_id (FK)     │
//! └─────────┘      └──────────────┘      └──────────────────┘
//!                         │ 1
//!                         │
//!                         │ 1
//!                  ┌──────────────┐      ┌──────────┐
//!                  │   wallets    │>─────│ currency │
//!                  │ user_id (UQ) │      │          │
//!                  └──────────────┘      └──────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a role record in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents a user record in the database.
///
/// `role_name` is joined in from `roles` when the user is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Primary key.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Login identifier. Unique, stored lower-cased.
    pub email: String,

    /// Optional phone number.
    pub telephone: Option<String>,

    /// Argon2 PHC string. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional URL of the profile picture.
    pub profile_photo: Option<String>,

    /// Disabled users can neither log in nor use existing tokens.
    pub is_disabled: bool,

    /// Stamped on every successful login.
    pub last_login_date: Option<DateTime<Utc>>,

    /// Foreign key to `roles`.
    pub role_id: i64,

    /// Name of the role, from the join.
    pub role_name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert or overwrite a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub password_hash: String,
    pub profile_photo: Option<String>,
    pub is_disabled: bool,
    pub role_id: i64,
}

/// Fields written by a user update. A `None` password keeps the old hash.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub password_hash: Option<String>,
    pub profile_photo: Option<String>,
    pub is_disabled: bool,
    pub role_id: i64,
}

/// Represents a currency record in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub id: i64,

    /// ISO 4217 code, e.g. "USD".
    pub currency_code: String,

    pub currency_name: String,

    /// Digits after the decimal point: 2 for USD, 0 for JPY.
    pub exponent: u32,
}

/// Represents a wallet record in the database.
///
/// ## Note on Types
///
/// Amounts are `i64` minor units because PostgreSQL has no unsigned
/// integers. The column carries `CHECK (amount >= 0)`. One major unit is
/// `10^currency_exponent` minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: i64,

    /// Owner. Unique: a user has at most one wallet.
    pub user_id: i64,

    pub currency_id: i64,

    /// Currency code, from the join with `currency`.
    pub currency_code: String,

    /// Exponent of the wallet's currency, from the same join.
    pub currency_exponent: u32,

    /// Balance in minor units.
    pub amount: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transaction types for wallet operations.
///
/// Each variant represents a different operation that can happen
/// to a wallet's balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money added to the wallet
    Credit,
    /// Money taken from the wallet
    Debit,
    /// Received from another wallet
    TransferIn,
    /// Sent to another wallet
    TransferOut,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
            TransactionType::TransferIn => "transfer_in",
            TransactionType::TransferOut => "transfer_out",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a transaction record in the database.
///
/// Every wallet mutation (credit, debit, each side of a transfer)
/// creates one row for history and auditing.
///
/// ## Example
///
/// When user 7 sends 25.00 to user 9, two rows are written:
/// ```text
/// TransactionRecord { user_id: 7, transaction_type: "transfer_out", amount: 2500, counterparty_user_id: Some(9), .. }
/// TransactionRecord { user_id: 9, transaction_type: "transfer_in",  amount: 2500, counterparty_user_id: Some(7), .. }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique transaction ID (UUID v4).
    pub id: Uuid,

    /// The wallet owner.
    pub user_id: i64,

    /// Type of transaction, see [`TransactionType`].
    pub transaction_type: String,

    /// Amount moved, always positive (minor units).
    pub amount: i64,

    /// Wallet balance once this mutation was applied.
    pub balance_after: i64,

    /// For transfers: the other user. NULL for credits/debits.
    pub counterparty_user_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Build a record stamped now, with a fresh id.
    pub fn new(
        user_id: i64,
        transaction_type: TransactionType,
        amount: i64,
        balance_after: i64,
        counterparty_user_id: Option<i64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            transaction_type: transaction_type.to_string(),
            amount,
            balance_after,
            counterparty_user_id,
            created_at: Utc::now(),
        }
    }
}
