//! # API Request Models
//!
//! Structures for incoming API request bodies and query strings.
//! Each body struct carries a `validate()` that handlers call before
//! touching any service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{validate_email, validate_password, validate_required};

/// Longest accepted display name.
const MAX_NAME_LEN: usize = 40;

/// Longest accepted role name.
const MAX_ROLE_NAME_LEN: usize = 128;

fn validate_optional(field: &str, value: Option<&str>, max_len: usize) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max_len => {
            Err(format!("{} must be at most {} characters", field, max_len))
        }
        _ => Ok(()),
    }
}

/// Request to register a new account (public).
///
/// ## Example JSON
///
/// ```json
/// {
///     "email": "ada@example.com",
///     "password": "correct-horse",
///     "name": "Ada Lovelace",
///     "telephone": "+254700000000",
///     "role_id": 3
/// }
/// ```
///
/// Self-registration always lands in the `General` role; `role_id` may be
/// omitted, and naming any other role is refused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub telephone: Option<String>,
    pub profile_photo: Option<String>,
    pub role_id: Option<i64>,
}

impl RegisterUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_required("name", &self.name, MAX_NAME_LEN)?;
        validate_optional("telephone", self.telephone.as_deref(), MAX_NAME_LEN)?;
        Ok(())
    }
}

/// Request to log in.
///
/// ## Example JSON
///
/// ```json
/// { "email": "ada@example.com", "password": "correct-horse" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err("password is required".to_string());
        }
        Ok(())
    }
}

/// Request to create a user from an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub telephone: Option<String>,
    pub profile_photo: Option<String>,
    pub role_id: i64,
    #[serde(default)]
    pub is_disabled: bool,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_required("name", &self.name, MAX_NAME_LEN)?;
        validate_optional("telephone", self.telephone.as_deref(), MAX_NAME_LEN)?;
        Ok(())
    }
}

/// Request to overwrite a user.
///
/// `password` is optional; when omitted the stored hash is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: Option<String>,
    pub name: String,
    pub telephone: Option<String>,
    pub profile_photo: Option<String>,
    pub role_id: i64,
    pub is_disabled: bool,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        validate_required("name", &self.name, MAX_NAME_LEN)?;
        validate_optional("telephone", self.telephone.as_deref(), MAX_NAME_LEN)?;
        Ok(())
    }
}

/// Request body for creating or renaming a role.
///
/// ```json
/// { "role_name": "Auditor" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRequest {
    pub role_name: String,
}

impl RoleRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_required("role_name", &self.role_name, MAX_ROLE_NAME_LEN)
    }
}

/// Request to open a wallet.
///
/// ```json
/// { "currency_id": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWalletRequest {
    pub currency_id: i64,
}

impl OpenWalletRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.currency_id <= 0 {
            return Err("currency_id must be a positive id".to_string());
        }
        Ok(())
    }
}

/// Body for credit, debit and transfer.
///
/// ## Example JSON
///
/// ```json
/// { "amount": 25.5, "currency_id": 1 }
/// ```
///
/// ## Notes
///
/// - `amount` is in major units (`25.5` = 25.50 USD). A JSON number or a
///   numeric string is accepted. It may not carry more decimal places
///   than the wallet's currency has.
/// - `currency_id` is optional; when present it must match the wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAmountRequest {
    pub amount: Decimal,
    pub currency_id: Option<i64>,
}

impl WalletAmountRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err("amount must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// `?user_id=` query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

/// `?role_id=` query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleIdQuery {
    pub role_id: i64,
}

/// `?current_user_id=&target_user_id=` query string for transfers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferQuery {
    /// User sending the money.
    pub current_user_id: i64,

    /// User receiving the money.
    pub target_user_id: i64,
}

/// `?page=&limit=` query string for list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for transaction history.
///
/// ## Example URL
///
/// ```text
/// GET /api/v1/transaction/record?user_id=7&page=1&limit=20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub user_id: i64,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterUserRequest {
        RegisterUserRequest {
            email: "ada@example.com".to_string(),
            password: "correct-horse".to_string(),
            name: "Ada".to_string(),
            telephone: None,
            profile_photo: None,
            role_id: None,
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register().validate().is_ok());

        let mut bad_email = register();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut short_password = register();
        short_password.password = "1234".to_string();
        assert_eq!(
            short_password.validate().unwrap_err(),
            "password must be at least 8 characters"
        );

        let mut no_name = register();
        no_name.name = " ".to_string();
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_update_without_password_is_valid() {
        let request = UpdateUserRequest {
            email: "ada@example.com".to_string(),
            password: None,
            name: "Ada".to_string(),
            telephone: Some("0700".to_string()),
            profile_photo: None,
            role_id: 2,
            is_disabled: true,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_amount_must_be_positive() {
        let zero = WalletAmountRequest { amount: Decimal::ZERO, currency_id: None };
        let negative = WalletAmountRequest { amount: Decimal::from(-10), currency_id: None };
        let ok = WalletAmountRequest { amount: Decimal::new(1, 2), currency_id: Some(1) };
        assert!(zero.validate().is_err());
        assert!(negative.validate().is_err());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_amount_is_read_in_major_units() {
        let fractional: WalletAmountRequest =
            serde_json::from_str(r#"{"amount": 10.5, "currency_id": 1}"#).unwrap();
        assert_eq!(fractional.amount, Decimal::new(105, 1));
        assert_eq!(fractional.currency_id, Some(1));

        let whole: WalletAmountRequest = serde_json::from_str(r#"{"amount": 100}"#).unwrap();
        assert_eq!(whole.amount, Decimal::from(100));
        assert!(whole.currency_id.is_none());

        let text: WalletAmountRequest = serde_json::from_str(r#"{"amount": "25.10"}"#).unwrap();
        assert_eq!(text.amount, Decimal::new(2510, 2));
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        assert!(serde_json::from_str::<WalletAmountRequest>(r#"{"amount": "ten"}"#).is_err());
        assert!(serde_json::from_str::<WalletAmountRequest>(r#"{"amount": true}"#).is_err());
    }

    #[test]
    fn test_create_user_defaults_to_enabled() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"email":"b@example.com","password":"password1","name":"Bo","role_id":3}"#,
        )
        .unwrap();
        assert!(!request.is_disabled);
        assert!(request.telephone.is_none());
    }

    #[test]
    fn test_role_name_required() {
        assert!(RoleRequest { role_name: "Auditor".to_string() }.validate().is_ok());
        assert!(RoleRequest { role_name: "".to_string() }.validate().is_err());
    }
}
