//! Wallet backend library.
//!
//! REST API for accounts, roles and a per-user wallet with credit, debit
//! and transfer. The `wallet-api` binary wires these modules into an
//! actix-web server; integration tests drive the services directly.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

use auth::TokenIssuer;
use config::AppConfig;
use db::Database;
use services::{AccountManager, WalletManager};

/// Application state shared across all handlers.
///
/// This struct contains all the shared resources that API handlers
/// and extractors need access to.
///
/// ## Why Arc?
/// `Arc` (Atomic Reference Counting) allows us to share ownership
/// of these resources across multiple threads safely.
pub struct AppState {
    /// Database connection pool for PostgreSQL
    pub db: Database,

    /// Application configuration
    pub config: AppConfig,

    /// Signs and verifies JWTs
    pub tokens: TokenIssuer,

    /// Users, roles and currencies
    pub accounts: AccountManager,

    /// Wallet operations
    pub wallets: WalletManager,
}
