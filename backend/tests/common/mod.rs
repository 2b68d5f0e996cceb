//! Shared setup for the database-backed integration tests.
//!
//! Point `TEST_DATABASE_URL` at a disposable PostgreSQL database to run
//! them; without it every test returns early and passes.

#![allow(dead_code)]

use uuid::Uuid;

use wallet_backend::db::{queries, CurrencyRecord, Database, UserRecord};
use wallet_backend::models::RegisterUserRequest;
use wallet_backend::services::AccountManager;

pub const PASSWORD: &str = "correct-horse-battery";

/// Connect and apply the schema, or `None` when no test database is set.
pub async fn test_db() -> Option<Database> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        }
    };

    let db = Database::connect(&url, 4)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    db.run_migrations().await.expect("Failed to run migrations");
    Some(db)
}

/// An address nobody else in the test run uses.
pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

pub fn registration(email: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        name: "Test User".to_string(),
        telephone: None,
        profile_photo: None,
        role_id: None,
    }
}

/// Register a fresh `General` user.
pub async fn new_user(accounts: &AccountManager) -> UserRecord {
    accounts
        .register_user(registration(&unique_email()))
        .await
        .expect("Failed to register test user")
}

pub async fn currency(db: &Database, code: &str) -> CurrencyRecord {
    queries::list_currencies(db.pool())
        .await
        .expect("Failed to list currencies")
        .into_iter()
        .find(|c| c.currency_code == code)
        .unwrap_or_else(|| panic!("Currency {} is not seeded", code))
}
