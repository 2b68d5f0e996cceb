//! # Ledger Arithmetic
//!
//! Pure balance rules shared by every wallet operation. Nothing here
//! touches the database; [`WalletManager`](super::WalletManager) locks the
//! rows, calls these functions, and writes back whatever they return.
//!
//! Balances are minor units. Clients speak major units (`10.50`), which
//! [`to_minor_units`] converts using the currency's exponent before any
//! arithmetic happens. A balance never goes below zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Largest currency exponent the currency table accepts.
pub const MAX_EXPONENT: u32 = 4;

/// Reasons a balance mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amounts must be strictly positive.
    #[error("Amount must be greater than 0, got {0}")]
    NonPositiveAmount(Decimal),

    /// More decimal places than the currency has.
    #[error("Amount {amount} has more than {exponent} decimal places")]
    TooPrecise { amount: Decimal, exponent: u32 },

    /// The balance cannot cover the requested amount.
    #[error("You have insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: i64, requested: i64 },

    /// The resulting balance does not fit in an i64.
    #[error("Balance overflow")]
    Overflow,
}

fn ensure_positive(amount: i64) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::NonPositiveAmount(Decimal::from(amount)));
    }
    Ok(())
}

/// Convert a major-unit amount into minor units.
///
/// `10.5` with exponent 2 is `1050`. Amounts must be positive and carry
/// no more decimal places than the exponent allows (`10.555` USD and
/// `1.5` JPY are refused rather than rounded).
pub fn to_minor_units(amount: Decimal, exponent: u32) -> Result<i64, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }

    let exponent = exponent.min(MAX_EXPONENT);
    let scaled = amount
        .checked_mul(Decimal::from(10i64.pow(exponent)))
        .ok_or(LedgerError::Overflow)?;

    if !scaled.fract().is_zero() {
        return Err(LedgerError::TooPrecise { amount, exponent });
    }

    scaled.to_i64().ok_or(LedgerError::Overflow)
}

/// Minor units back to a major-unit amount with `exponent` decimal places.
pub fn to_major_units(amount: i64, exponent: u32) -> Decimal {
    Decimal::new(amount, exponent.min(MAX_EXPONENT))
}

/// Balance after adding `amount`.
pub fn credit(balance: i64, amount: i64) -> Result<i64, LedgerError> {
    ensure_positive(amount)?;
    balance.checked_add(amount).ok_or(LedgerError::Overflow)
}

/// Balance after removing `amount`, if the balance covers it.
pub fn debit(balance: i64, amount: i64) -> Result<i64, LedgerError> {
    ensure_positive(amount)?;
    if balance < amount {
        return Err(LedgerError::InsufficientFunds {
            available: balance,
            requested: amount,
        });
    }
    Ok(balance - amount)
}

/// New `(source, target)` balances after moving `amount`.
///
/// The source is checked exactly like [`debit`]; the target is only
/// touched when the source can pay.
pub fn transfer(source: i64, target: i64, amount: i64) -> Result<(i64, i64), LedgerError> {
    let source_after = debit(source, amount)?;
    let target_after = credit(target, amount)?;
    Ok((source_after, target_after))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALANCES: [i64; 6] = [0, 1, 99, 100, 101, 1_000_000];
    const AMOUNTS: [i64; 5] = [1, 50, 100, 101, 999_999];

    #[test]
    fn test_credit_adds_amount() {
        for balance in BALANCES {
            for amount in AMOUNTS {
                assert_eq!(credit(balance, amount), Ok(balance + amount));
            }
        }
    }

    #[test]
    fn test_debit_succeeds_iff_covered() {
        for balance in BALANCES {
            for amount in AMOUNTS {
                match debit(balance, amount) {
                    Ok(after) => {
                        assert!(balance >= amount);
                        assert_eq!(after, balance - amount);
                    }
                    Err(LedgerError::InsufficientFunds { available, requested }) => {
                        assert!(balance < amount);
                        assert_eq!(available, balance);
                        assert_eq!(requested, amount);
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        }
    }

    #[test]
    fn test_debit_of_entire_balance_leaves_zero() {
        assert_eq!(debit(250, 250), Ok(0));
    }

    #[test]
    fn test_transfer_conserves_total() {
        for source in BALANCES {
            for target in BALANCES {
                for amount in AMOUNTS {
                    match transfer(source, target, amount) {
                        Ok((s, t)) => {
                            assert!(source >= amount);
                            assert_eq!(s, source - amount);
                            assert_eq!(t, target + amount);
                            assert_eq!(s + t, source + target);
                        }
                        Err(e) => {
                            assert!(source < amount);
                            assert!(matches!(e, LedgerError::InsufficientFunds { .. }));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        assert_eq!(credit(10, 0), Err(LedgerError::NonPositiveAmount(Decimal::ZERO)));
        assert_eq!(debit(10, -5), Err(LedgerError::NonPositiveAmount(Decimal::from(-5))));
        assert_eq!(transfer(10, 10, 0), Err(LedgerError::NonPositiveAmount(Decimal::ZERO)));
    }

    #[test]
    fn test_credit_overflow_reported() {
        assert_eq!(credit(i64::MAX, 1), Err(LedgerError::Overflow));
        assert_eq!(transfer(5, i64::MAX, 5), Err(LedgerError::Overflow));
    }

    #[test]
    fn test_major_units_convert_by_exponent() {
        assert_eq!(to_minor_units(Decimal::new(105, 1), 2), Ok(1_050));
        assert_eq!(to_minor_units(Decimal::from(100), 2), Ok(10_000));
        assert_eq!(to_minor_units(Decimal::new(1, 2), 2), Ok(1));
        assert_eq!(to_minor_units(Decimal::from(1_000), 0), Ok(1_000));
        // Trailing zeros are not extra precision.
        assert_eq!(to_minor_units(Decimal::new(25_000, 3), 2), Ok(2_500));
    }

    #[test]
    fn test_excess_precision_refused() {
        assert_eq!(
            to_minor_units(Decimal::new(10_555, 3), 2),
            Err(LedgerError::TooPrecise {
                amount: Decimal::new(10_555, 3),
                exponent: 2
            })
        );
        assert!(matches!(
            to_minor_units(Decimal::new(15, 1), 0),
            Err(LedgerError::TooPrecise { exponent: 0, .. })
        ));
    }

    #[test]
    fn test_non_positive_major_amounts_refused() {
        assert!(matches!(
            to_minor_units(Decimal::ZERO, 2),
            Err(LedgerError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            to_minor_units(Decimal::new(-1, 2), 2),
            Err(LedgerError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_huge_major_amount_overflows() {
        assert_eq!(to_minor_units(Decimal::MAX, 2), Err(LedgerError::Overflow));
        assert_eq!(
            to_minor_units(Decimal::from(i64::MAX), 2),
            Err(LedgerError::Overflow)
        );
    }

    #[test]
    fn test_minor_units_back_to_major() {
        assert_eq!(to_major_units(1_050, 2), Decimal::new(105, 1));
        assert_eq!(to_major_units(1_050, 2).to_string(), "10.50");
        assert_eq!(to_major_units(1_000, 0).to_string(), "1000");
    }
}
