//! # Database Queries
//!
//! This module contains all the SQL queries for interacting with the database.
//! Each function performs a specific database operation.
//!
//! ## Query Organization
//!
//! Queries are grouped by the table they operate on:
//! - `*_role*` - Role table operations
//! - `*_user*` - User table operations
//! - `*_currenc*` - Currency table operations
//! - `*_wallet*` - Wallet table operations
//! - `*_transaction*` - Transaction history operations
//! - `*_token*` - Revoked token operations
//!
//! Functions taking a `&Pool` run on their own connection and commit
//! immediately. Functions taking a `&Transaction` run inside a caller-owned
//! database transaction; nothing they write is visible until the caller
//! commits.
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Lookups that may miss
//! return `Option`; updates and deletes report whether a row was touched.

use deadpool_postgres::Pool;
use tokio_postgres::{Row, Transaction};
use tracing::{debug, info};

use super::models::*;
use super::DatabaseError;

// ============================================
// HELPER FUNCTIONS
// ============================================

async fn client(pool: &Pool) -> Result<deadpool_postgres::Client, DatabaseError> {
    pool.get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
}

/// Helper to convert a database row to RoleRecord
fn row_to_role(row: &Row) -> RoleRecord {
    RoleRecord {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Helper to convert a database row to UserRecord
fn row_to_user(row: &Row) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        telephone: row.get("telephone"),
        password_hash: row.get("password_hash"),
        profile_photo: row.get("profile_photo"),
        is_disabled: row.get("is_disabled"),
        last_login_date: row.get("last_login_date"),
        role_id: row.get("role_id"),
        role_name: row.get("role_name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// `SMALLINT` exponent column as `u32`. The table constrains it to 0..=4.
fn exponent_from(row: &Row, column: &str) -> u32 {
    let exponent: i16 = row.get(column);
    u32::try_from(exponent).unwrap_or(0)
}

/// Helper to convert a database row to CurrencyRecord
fn row_to_currency(row: &Row) -> CurrencyRecord {
    CurrencyRecord {
        id: row.get("id"),
        currency_code: row.get("currency_code"),
        currency_name: row.get("currency_name"),
        exponent: exponent_from(row, "exponent"),
    }
}

/// Helper to convert a database row to WalletRecord
fn row_to_wallet(row: &Row) -> WalletRecord {
    WalletRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        currency_id: row.get("currency_id"),
        currency_code: row.get("currency_code"),
        currency_exponent: exponent_from(row, "currency_exponent"),
        amount: row.get("amount"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Helper to convert a database row to TransactionRecord
fn row_to_transaction(row: &Row) -> TransactionRecord {
    TransactionRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        transaction_type: row.get("transaction_type"),
        amount: row.get("amount"),
        balance_after: row.get("balance_after"),
        counterparty_user_id: row.get("counterparty_user_id"),
        created_at: row.get("created_at"),
    }
}

const USER_COLUMNS: &str = r#"
    u.id, u.name, u.email, u.telephone, u.password_hash,
    u.profile_photo, u.is_disabled, u.last_login_date,
    u.role_id, r.name AS role_name, u.created_at, u.updated_at
"#;

const WALLET_COLUMNS: &str = r#"
    w.id, w.user_id, w.currency_id, c.currency_code,
    c.exponent AS currency_exponent, w.amount, w.created_at, w.updated_at
"#;

// ============================================
// ROLE QUERIES
// ============================================

/// Get a role by id.
pub async fn get_role_by_id(pool: &Pool, id: i64) -> Result<Option<RoleRecord>, DatabaseError> {
    debug!("Fetching role: {}", id);

    let client = client(pool).await?;
    let row = client
        .query_opt(
            "SELECT id, name, created_at, updated_at FROM roles WHERE id = $1",
            &[&id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_role))
}

/// Get a role by its exact name.
pub async fn get_role_by_name(pool: &Pool, name: &str) -> Result<Option<RoleRecord>, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_opt(
            "SELECT id, name, created_at, updated_at FROM roles WHERE name = $1",
            &[&name],
        )
        .await?;

    Ok(row.as_ref().map(row_to_role))
}

/// Get a page of roles, newest first.
pub async fn list_roles(pool: &Pool, limit: i64, offset: i64) -> Result<Vec<RoleRecord>, DatabaseError> {
    debug!("Fetching roles (limit: {}, offset: {})", limit, offset);

    let client = client(pool).await?;
    let rows = client
        .query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM roles
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
            &[&limit, &offset],
        )
        .await?;

    Ok(rows.iter().map(row_to_role).collect())
}

/// Insert a role.
pub async fn create_role(pool: &Pool, name: &str) -> Result<RoleRecord, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
            &[&name],
        )
        .await?;

    info!("Role created: {}", name);
    Ok(row_to_role(&row))
}

/// Rename a role. Returns `None` when no role has that id.
pub async fn update_role(pool: &Pool, id: i64, name: &str) -> Result<Option<RoleRecord>, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_opt(
            r#"
            UPDATE roles
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
            &[&id, &name],
        )
        .await?;

    Ok(row.as_ref().map(row_to_role))
}

/// Delete a role. Returns `false` when no role has that id.
pub async fn delete_role(pool: &Pool, id: i64) -> Result<bool, DatabaseError> {
    let client = client(pool).await?;
    let affected = client.execute("DELETE FROM roles WHERE id = $1", &[&id]).await?;
    Ok(affected > 0)
}

// ============================================
// USER QUERIES
// ============================================

/// Get a user (with role name) by id.
pub async fn get_user_by_id(pool: &Pool, id: i64) -> Result<Option<UserRecord>, DatabaseError> {
    debug!("Fetching user: {}", id);

    let client = client(pool).await?;
    let row = client
        .query_opt(
            &format!(
                "SELECT {} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
                USER_COLUMNS
            ),
            &[&id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_user))
}

/// Get a user (with role name) by email.
pub async fn get_user_by_email(pool: &Pool, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
    debug!("Fetching user by email: {}", email);

    let client = client(pool).await?;
    let row = client
        .query_opt(
            &format!(
                "SELECT {} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.email = $1",
                USER_COLUMNS
            ),
            &[&email],
        )
        .await?;

    Ok(row.as_ref().map(row_to_user))
}

/// Get a page of users, newest first.
pub async fn list_users(pool: &Pool, limit: i64, offset: i64) -> Result<Vec<UserRecord>, DatabaseError> {
    debug!("Fetching users (limit: {}, offset: {})", limit, offset);

    let client = client(pool).await?;
    let rows = client
        .query(
            &format!(
                r#"
                SELECT {}
                FROM users u JOIN roles r ON r.id = u.role_id
                ORDER BY u.created_at DESC, u.id DESC
                LIMIT $1 OFFSET $2
                "#,
                USER_COLUMNS
            ),
            &[&limit, &offset],
        )
        .await?;

    Ok(rows.iter().map(row_to_user).collect())
}

/// Insert a user and return its id.
pub async fn create_user(pool: &Pool, user: &NewUser) -> Result<i64, DatabaseError> {
    debug!("Creating user: {}", user.email);

    let client = client(pool).await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO users (
                name, email, telephone, password_hash,
                profile_photo, is_disabled, role_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
            &[
                &user.name,
                &user.email,
                &user.telephone,
                &user.password_hash,
                &user.profile_photo,
                &user.is_disabled,
                &user.role_id,
            ],
        )
        .await?;

    let id: i64 = row.get("id");
    info!("User created: {} (id {})", user.email, id);
    Ok(id)
}

/// Overwrite a user's fields. Returns `false` when no user has that id.
pub async fn update_user(pool: &Pool, id: i64, user: &UserUpdate) -> Result<bool, DatabaseError> {
    debug!("Updating user: {}", id);

    let client = client(pool).await?;
    let affected = client
        .execute(
            r#"
            UPDATE users
            SET
                name = $2,
                email = $3,
                telephone = $4,
                password_hash = COALESCE($5, password_hash),
                profile_photo = $6,
                is_disabled = $7,
                role_id = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
            &[
                &id,
                &user.name,
                &user.email,
                &user.telephone,
                &user.password_hash,
                &user.profile_photo,
                &user.is_disabled,
                &user.role_id,
            ],
        )
        .await?;

    Ok(affected > 0)
}

/// Record a successful login.
pub async fn touch_last_login(pool: &Pool, id: i64) -> Result<(), DatabaseError> {
    let client = client(pool).await?;
    client
        .execute(
            "UPDATE users SET last_login_date = NOW() WHERE id = $1",
            &[&id],
        )
        .await?;
    Ok(())
}

/// Delete a user. Wallet and history go with it (ON DELETE CASCADE).
pub async fn delete_user(pool: &Pool, id: i64) -> Result<bool, DatabaseError> {
    let client = client(pool).await?;
    let affected = client.execute("DELETE FROM users WHERE id = $1", &[&id]).await?;
    Ok(affected > 0)
}

// ============================================
// CURRENCY QUERIES
// ============================================

/// Get a currency by id.
pub async fn get_currency_by_id(pool: &Pool, id: i64) -> Result<Option<CurrencyRecord>, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_opt(
            "SELECT id, currency_code, currency_name, exponent FROM currency WHERE id = $1",
            &[&id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_currency))
}

/// All known currencies, by code.
pub async fn list_currencies(pool: &Pool) -> Result<Vec<CurrencyRecord>, DatabaseError> {
    let client = client(pool).await?;
    let rows = client
        .query(
            "SELECT id, currency_code, currency_name, exponent FROM currency ORDER BY currency_code",
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_currency).collect())
}

// ============================================
// WALLET QUERIES
// ============================================

/// Get the wallet owned by a user.
pub async fn get_wallet_by_user(pool: &Pool, user_id: i64) -> Result<Option<WalletRecord>, DatabaseError> {
    debug!("Fetching wallet for user: {}", user_id);

    let client = client(pool).await?;
    let row = client
        .query_opt(
            &format!(
                r#"
                SELECT {}
                FROM wallets w JOIN currency c ON c.id = w.currency_id
                WHERE w.user_id = $1
                "#,
                WALLET_COLUMNS
            ),
            &[&user_id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_wallet))
}

/// Create an empty wallet and return its id.
pub async fn create_wallet(pool: &Pool, user_id: i64, currency_id: i64) -> Result<i64, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO wallets (user_id, currency_id, amount)
            VALUES ($1, $2, 0)
            RETURNING id
            "#,
            &[&user_id, &currency_id],
        )
        .await?;

    info!("Wallet opened for user {}", user_id);
    Ok(row.get("id"))
}

/// Lock and read the wallet owned by a user.
///
/// The row stays locked until the surrounding transaction ends.
pub async fn lock_wallet_by_user(
    tx: &Transaction<'_>,
    user_id: i64,
) -> Result<Option<WalletRecord>, DatabaseError> {
    let row = tx
        .query_opt(
            &format!(
                r#"
                SELECT {}
                FROM wallets w JOIN currency c ON c.id = w.currency_id
                WHERE w.user_id = $1
                FOR UPDATE OF w
                "#,
                WALLET_COLUMNS
            ),
            &[&user_id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_wallet))
}

/// Lock and read the wallets owned by several users in one statement.
///
/// Rows are locked in wallet id order so two concurrent transfers over
/// the same pair cannot deadlock.
pub async fn lock_wallets_by_users(
    tx: &Transaction<'_>,
    user_ids: &[i64],
) -> Result<Vec<WalletRecord>, DatabaseError> {
    let rows = tx
        .query(
            &format!(
                r#"
                SELECT {}
                FROM wallets w JOIN currency c ON c.id = w.currency_id
                WHERE w.user_id = ANY($1)
                ORDER BY w.id
                FOR UPDATE OF w
                "#,
                WALLET_COLUMNS
            ),
            &[&user_ids],
        )
        .await?;

    Ok(rows.iter().map(row_to_wallet).collect())
}

/// Write a new balance on a locked wallet.
pub async fn set_wallet_amount(
    tx: &Transaction<'_>,
    wallet_id: i64,
    amount: i64,
) -> Result<(), DatabaseError> {
    let affected = tx
        .execute(
            "UPDATE wallets SET amount = $2, updated_at = NOW() WHERE id = $1",
            &[&wallet_id, &amount],
        )
        .await?;

    if affected == 0 {
        return Err(DatabaseError::NotFound(format!("Wallet not found: {}", wallet_id)));
    }

    Ok(())
}

// ============================================
// TRANSACTION QUERIES
// ============================================

/// Append a history row inside the caller's transaction.
pub async fn insert_transaction(
    tx: &Transaction<'_>,
    record: &TransactionRecord,
) -> Result<(), DatabaseError> {
    tx.execute(
        r#"
        INSERT INTO transactions (
            id, user_id, transaction_type, amount,
            balance_after, counterparty_user_id, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
        &[
            &record.id,
            &record.user_id,
            &record.transaction_type,
            &record.amount,
            &record.balance_after,
            &record.counterparty_user_id,
            &record.created_at,
        ],
    )
    .await?;

    Ok(())
}

/// Get a page of a user's history, newest first.
pub async fn get_user_transactions(
    pool: &Pool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<TransactionRecord>, DatabaseError> {
    debug!("Fetching transactions for user: {}", user_id);

    let client = client(pool).await?;
    let rows = client
        .query(
            r#"
            SELECT
                id, user_id, transaction_type, amount,
                balance_after, counterparty_user_id, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC, seq DESC
            LIMIT $2 OFFSET $3
            "#,
            &[&user_id, &limit, &offset],
        )
        .await?;

    Ok(rows.iter().map(row_to_transaction).collect())
}

/// Count a user's history rows (for pagination).
pub async fn count_user_transactions(pool: &Pool, user_id: i64) -> Result<i64, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_one(
            "SELECT COUNT(*) AS count FROM transactions WHERE user_id = $1",
            &[&user_id],
        )
        .await?;

    Ok(row.get("count"))
}

// ============================================
// REVOKED TOKEN QUERIES
// ============================================

/// Blacklist a token id. Revoking twice is a no-op.
pub async fn revoke_token(pool: &Pool, jti: &str) -> Result<(), DatabaseError> {
    let client = client(pool).await?;
    client
        .execute(
            "INSERT INTO revoked_tokens (jti) VALUES ($1) ON CONFLICT (jti) DO NOTHING",
            &[&jti],
        )
        .await?;

    info!("Token revoked: {}", jti);
    Ok(())
}

/// Whether a token id has been blacklisted.
pub async fn is_token_revoked(pool: &Pool, jti: &str) -> Result<bool, DatabaseError> {
    let client = client(pool).await?;
    let row = client
        .query_one(
            "SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1) AS revoked",
            &[&jti],
        )
        .await?;

    Ok(row.get("revoked"))
}
