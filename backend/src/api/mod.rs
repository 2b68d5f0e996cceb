//! # REST API Module
//!
//! This module defines all HTTP endpoints for the wallet API.
//! Everything lives under `/api/v1`.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/healthz/status` | Health check |
//! | POST | `/auth/register-user` | Register, returns tokens |
//! | POST | `/auth/login` | Log in, returns tokens |
//! | DELETE | `/auth/logout` | Revoke the access token |
//! | DELETE | `/auth/logout/refresh` | Revoke the refresh token |
//! | POST | `/auth/refresh` | New access token |
//! | GET/POST/PUT/DELETE | `/user` | User CRUD |
//! | GET | `/user/all` | List users |
//! | GET/POST/PUT/DELETE | `/role` | Role CRUD |
//! | GET | `/role/all` | List roles |
//! | GET | `/currency/all` | List currencies |
//! | GET/POST/PUT/DELETE | `/transaction/wallet` | Balance, open, credit, debit |
//! | PUT | `/transaction/transfer` | Transfer between users |
//! | GET | `/transaction/record` | Transaction history |
//!
//! ## Request/Response Format
//!
//! All requests and responses use JSON:
//!
//! ```json
//! // Success response
//! {
//!     "success": true,
//!     "message": "Wallet credited successfully",
//!     "data": { ... }
//! }
//!
//! // Error response
//! {
//!     "success": false,
//!     "message": "Human readable message",
//!     "code": "ERROR_CODE"
//! }
//! ```

pub mod handlers;
pub mod routes;

pub use routes::configure_routes;
