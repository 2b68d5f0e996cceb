//! Wallet balances against a real database: refused operations leave
//! stored balances alone, transfers commit both sides, and amounts follow
//! the currency's exponent.
//!
//! Run with: TEST_DATABASE_URL=postgres://... cargo test --test wallets

mod common;

use actix_web::http::StatusCode;
use actix_web::ResponseError;
use rust_decimal::Decimal;

use wallet_backend::db::{Database, UserRecord};
use wallet_backend::models::WalletResponse;
use wallet_backend::services::ledger::LedgerError;
use wallet_backend::services::wallet_manager::WalletError;
use wallet_backend::services::{AccountManager, WalletManager};

use common::{currency, new_user, test_db};

// ============================================================================
// Helpers
// ============================================================================

struct Fixture {
    accounts: AccountManager,
    wallets: WalletManager,
    db: Database,
}

impl Fixture {
    fn new(db: Database) -> Self {
        Self {
            accounts: AccountManager::new(db.clone()),
            wallets: WalletManager::new(db.clone()),
            db,
        }
    }

    /// A new user holding a wallet in `code` with `opening` major units.
    async fn funded_user(&self, code: &str, opening: Decimal) -> UserRecord {
        let user = new_user(&self.accounts).await;
        let currency = currency(&self.db, code).await;
        self.wallets.open_wallet(user.id, currency.id).await.unwrap();
        if opening > Decimal::ZERO {
            self.wallets.credit(user.id, opening, None).await.unwrap();
        }
        user
    }

    async fn balance(&self, user_id: i64) -> i64 {
        self.wallets.get_wallet(user_id).await.unwrap().amount
    }

    async fn cleanup(&self, users: &[&UserRecord]) {
        for user in users {
            self.accounts.delete_user(user.id).await.unwrap();
        }
    }
}

// ============================================================================
// Credit / debit
// ============================================================================

#[actix_rt::test]
async fn test_credit_and_debit_in_major_units() {
    let Some(db) = test_db().await else { return };
    let fx = Fixture::new(db);
    let user = fx.funded_user("USD", Decimal::ZERO).await;

    let wallet = fx.wallets.credit(user.id, Decimal::new(105, 1), None).await.unwrap();
    assert_eq!(wallet.amount, 1_050);
    assert_eq!(fx.balance(user.id).await, 1_050);

    let wallet = fx.wallets.debit(user.id, Decimal::new(25, 2), None).await.unwrap();
    assert_eq!(wallet.amount, 1_025);

    let response = WalletResponse::from(fx.wallets.get_wallet(user.id).await.unwrap());
    assert_eq!(response.amount, Decimal::new(1_025, 2));
    assert_eq!(response.formatted_amount, "10.25 USD");

    fx.cleanup(&[&user]).await;
}

#[actix_rt::test]
async fn test_overdraw_is_refused_and_balance_kept() {
    let Some(db) = test_db().await else { return };
    let fx = Fixture::new(db);
    let user = fx.funded_user("USD", Decimal::from(50)).await;

    let err = fx
        .wallets
        .debit(user.id, Decimal::from(80), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WalletError::Ledger(LedgerError::InsufficientFunds {
            available: 5_000,
            requested: 8_000
        })
    ));
    assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(fx.balance(user.id).await, 5_000);

    // Nothing was recorded for the refused debit.
    let history = fx.wallets.list_transactions(user.id, None, None).await.unwrap();
    assert_eq!(history.total, 1);
    assert_eq!(history.transactions[0].transaction_type, "credit");

    fx.cleanup(&[&user]).await;
}

#[actix_rt::test]
async fn test_amount_precision_follows_currency() {
    let Some(db) = test_db().await else { return };
    let fx = Fixture::new(db);
    let yen = fx.funded_user("JPY", Decimal::ZERO).await;
    let dollars = fx.funded_user("USD", Decimal::ZERO).await;

    let err = fx
        .wallets
        .credit(yen.id, Decimal::new(15, 1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::Ledger(LedgerError::TooPrecise { exponent: 0, .. })));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(fx.balance(yen.id).await, 0);

    let wallet = fx.wallets.credit(yen.id, Decimal::from(1_000), None).await.unwrap();
    assert_eq!(wallet.amount, 1_000);
    assert_eq!(WalletResponse::from(wallet).formatted_amount, "1,000 JPY");

    let err = fx
        .wallets
        .credit(dollars.id, Decimal::new(10_555, 3), None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(fx.balance(dollars.id).await, 0);

    fx.cleanup(&[&yen, &dollars]).await;
}

// ============================================================================
// Transfer
// ============================================================================

#[actix_rt::test]
async fn test_transfer_commits_both_sides_and_conserves_total() {
    let Some(db) = test_db().await else { return };
    let fx = Fixture::new(db);
    let sender = fx.funded_user("USD", Decimal::from(50)).await;
    let receiver = fx.funded_user("USD", Decimal::new(125, 2)).await;

    let before = fx.balance(sender.id).await + fx.balance(receiver.id).await;

    let (source, target) = fx
        .wallets
        .transfer(sender.id, receiver.id, Decimal::new(2_025, 2), None)
        .await
        .unwrap();
    assert_eq!(source.amount, 2_975);
    assert_eq!(target.amount, 2_150);

    let sender_after = fx.balance(sender.id).await;
    let receiver_after = fx.balance(receiver.id).await;
    assert_eq!(sender_after, 2_975);
    assert_eq!(receiver_after, 2_150);
    assert_eq!(sender_after + receiver_after, before);

    let sent = fx.wallets.list_transactions(sender.id, None, None).await.unwrap();
    assert_eq!(sent.transactions[0].transaction_type, "transfer_out");
    assert_eq!(sent.transactions[0].counterparty_user_id, Some(receiver.id));
    let received = fx.wallets.list_transactions(receiver.id, None, None).await.unwrap();
    assert_eq!(received.transactions[0].transaction_type, "transfer_in");
    assert_eq!(received.transactions[0].balance_after, 2_150);

    fx.cleanup(&[&sender, &receiver]).await;
}

#[actix_rt::test]
async fn test_refused_transfer_changes_nothing() {
    let Some(db) = test_db().await else { return };
    let fx = Fixture::new(db);
    let sender = fx.funded_user("USD", Decimal::from(10)).await;
    let receiver = fx.funded_user("USD", Decimal::from(5)).await;
    let stranger = fx.funded_user("EUR", Decimal::from(5)).await;

    let err = fx
        .wallets
        .transfer(sender.id, receiver.id, Decimal::new(1_001, 2), None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);

    let err = fx
        .wallets
        .transfer(sender.id, stranger.id, Decimal::from(1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::CurrencyMismatch { .. }));

    assert_eq!(fx.balance(sender.id).await, 1_000);
    assert_eq!(fx.balance(receiver.id).await, 500);
    assert_eq!(fx.balance(stranger.id).await, 500);

    let history = fx.wallets.list_transactions(receiver.id, None, None).await.unwrap();
    assert_eq!(history.total, 1);

    fx.cleanup(&[&sender, &receiver, &stranger]).await;
}

// ============================================================================
// History
// ============================================================================

#[actix_rt::test]
async fn test_history_pages_are_stable() {
    let Some(db) = test_db().await else { return };
    let fx = Fixture::new(db);
    let user = fx.funded_user("USD", Decimal::ZERO).await;

    for cents in 1..=5 {
        fx.wallets.credit(user.id, Decimal::new(cents, 2), None).await.unwrap();
    }

    let all = fx.wallets.list_transactions(user.id, Some(1), Some(10)).await.unwrap();
    assert_eq!(all.total, 5);
    assert_eq!(all.currency_exponent, 2);
    let balances: Vec<i64> = all.transactions.iter().map(|t| t.balance_after).collect();
    assert_eq!(balances, vec![15, 10, 6, 3, 1]);

    let mut paged = Vec::new();
    for page in 1..=3 {
        let chunk = fx
            .wallets
            .list_transactions(user.id, Some(page), Some(2))
            .await
            .unwrap();
        paged.extend(chunk.transactions.into_iter().map(|t| t.id));
    }
    let ids: Vec<_> = all.transactions.iter().map(|t| t.id).collect();
    assert_eq!(paged, ids);

    fx.cleanup(&[&user]).await;
}
