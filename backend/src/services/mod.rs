//! # Services Module
//!
//! This module contains the core business logic services for the
//! wallet backend. Each service handles a specific domain.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `WalletManager` | Open wallets, credit, debit, transfer, history |
//! | `AccountManager` | Users, roles, currencies, login checks |
//! | `ledger` | Pure balance arithmetic used by `WalletManager` |
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SERVICES LAYER                            │
//! │                                                                  │
//! │  ┌──────────────────────────┐   ┌───────────────────────────┐   │
//! │  │      WalletManager       │   │      AccountManager       │   │
//! │  │  • open_wallet()         │   │  • register_user()        │   │
//! │  │  • credit()  • debit()   │   │  • authenticate()         │   │
//! │  │  • transfer()            │   │  • users / roles CRUD     │   │
//! │  └──────────────────────────┘   └───────────────────────────┘   │
//! │               │                                                  │
//! │               ▼                                                  │
//! │        ┌────────────┐                                            │
//! │        │   ledger   │  credit / debit / transfer (no I/O)        │
//! │        └────────────┘                                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod account_manager;
pub mod ledger;
pub mod wallet_manager;

pub use account_manager::AccountManager;
pub use wallet_manager::WalletManager;
