//! # Wallet Backend Service
//!
//! This is the main entry point for the wallet backend. It provides:
//!
//! - REST API for accounts, roles and currencies
//! - JWT authentication (access + refresh tokens, revocable)
//! - A per-user wallet with credit, debit and transfer
//! - Transaction history in PostgreSQL
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        BACKEND SERVICE                           │
//! │                                                                  │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                   REST API (Actix)  /api/v1                │  │
//! │  │  /auth  /user  /role  /currency  /transaction  /healthz    │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                          │                                       │
//! │               ┌──────────┴──────────┐                            │
//! │               ▼                     ▼                            │
//! │  ┌──────────────────────┐  ┌──────────────────────┐             │
//! │  │  Bearer extractor    │  │   SERVICE LAYER      │             │
//! │  │  (TokenIssuer, JWT)  │  │  AccountManager      │             │
//! │  └──────────────────────┘  │  WalletManager       │             │
//! │                            │    └─ ledger         │             │
//! │                            └──────────────────────┘             │
//! │                          │                                       │
//! │                   ┌──────┴──────┐                                │
//! │                   │  PostgreSQL │                                │
//! │                   │  Database   │                                │
//! │                   └─────────────┘                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Set up PostgreSQL and create the database
//! 2. Set `DATABASE_URL` and `JWT_SECRET` (or put them in `.env`)
//! 3. Start the server: `cargo run --bin wallet-api`
//!
//! The schema is applied automatically at startup.
//!
//! ## Environment Variables
//!
//! See `wallet_backend::config` for the full list.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wallet_backend::api;
use wallet_backend::auth::TokenIssuer;
use wallet_backend::config::AppConfig;
use wallet_backend::db::Database;
use wallet_backend::services::{AccountManager, WalletManager};
use wallet_backend::AppState;

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Main entry point for the backend service.
///
/// This function:
/// 1. Loads configuration from environment
/// 2. Initializes database connection and schema
/// 3. Seeds the default administrator
/// 4. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Initialize Logging
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wallet_backend=debug"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Wallet Backend Service");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    let config = AppConfig::from_env().expect("Failed to load configuration");

    info!("📋 Configuration loaded");
    info!("   Pool size: {}", config.database_pool_size);
    info!(
        "   Token lifetimes: {} min access, {} days refresh",
        config.jwt_access_ttl_minutes, config.jwt_refresh_ttl_days
    );

    // =========================================
    // STEP 3: Initialize Database
    // =========================================
    let db = Database::connect(&config.database_url, config.database_pool_size)
        .await
        .expect("Failed to connect to database");

    info!("🗄️  Database connected");

    db.run_migrations().await.expect("Failed to run migrations");

    info!("📦 Database migrations complete");

    // =========================================
    // STEP 4: Initialize Services
    // =========================================
    let tokens = TokenIssuer::from_config(&config);
    let accounts = AccountManager::new(db.clone());
    let wallets = WalletManager::new(db.clone());

    info!("🔧 Services initialized");

    // =========================================
    // STEP 5: Seed Default User
    // =========================================
    match &config.default_user_password {
        Some(password) => match accounts.seed_default_user(&config.default_user_email, password).await {
            Ok(true) => info!("👤 Default user {} created", config.default_user_email),
            Ok(false) => info!("👤 Default user {} already exists", config.default_user_email),
            Err(e) => error!("Failed to seed default user: {}", e),
        },
        None => warn!("DEFAULT_USER_PASSWORD not set, skipping default user"),
    }

    // =========================================
    // STEP 6: Create Application State
    // =========================================
    let app_state = Arc::new(AppState {
        db,
        config: config.clone(),
        tokens,
        accounts,
        wallets,
    });

    // =========================================
    // STEP 7: Start HTTP Server
    // =========================================
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    info!("🌐 Starting HTTP server on {}:{}", server_host, server_port);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))

            // CORS for browser clients
            .wrap(build_cors(&app_state.config.cors_allowed_origins))

            // Add logging middleware
            .wrap(middleware::Logger::default())

            // Configure API routes
            .configure(api::configure_routes)
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
