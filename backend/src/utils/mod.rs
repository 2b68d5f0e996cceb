//! # Utilities Module
//!
//! This module contains helper functions and utilities used
//! across the backend service.

/// Page size used when the client sends none (or 0).
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Format a minor-unit amount as a human-readable string.
///
/// `exponent` is the number of digits after the decimal point for the
/// currency: 2 for cents, 0 for currencies without a minor unit.
///
/// ## Examples
///
/// ```rust,ignore
/// assert_eq!(format_amount(100, 2, "USD"), "1.00 USD");
/// assert_eq!(format_amount(123_456_789, 2, "KES"), "1,234,567.89 KES");
/// assert_eq!(format_amount(1_000, 0, "JPY"), "1,000 JPY");
/// ```
pub fn format_amount(amount: i64, exponent: u32, currency_code: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let divisor = 10u64.pow(exponent);
    let whole = abs / divisor;
    let fraction = abs % divisor;

    // Add commas
    let whole_str = whole.to_string();
    let mut grouped = String::with_capacity(whole_str.len() + whole_str.len() / 3);
    for (i, c) in whole_str.chars().enumerate() {
        if i > 0 && (whole_str.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if exponent == 0 {
        return format!("{}{} {}", sign, grouped, currency_code);
    }

    format!(
        "{}{}.{:0width$} {}",
        sign,
        grouped,
        fraction,
        currency_code,
        width = exponent as usize
    )
}

/// Resolve `page`/`limit` query values into `(page, limit, offset)`.
///
/// Missing or zero values fall back to page 1 and [`DEFAULT_PAGE_SIZE`].
/// Negative values are rejected.
pub fn paginate(page: Option<i64>, limit: Option<i64>) -> Result<(i64, i64, i64), String> {
    let page = match page {
        None | Some(0) => 1,
        Some(p) if p < 0 => return Err(format!("page must be positive, got {}", p)),
        Some(p) => p,
    };
    let limit = match limit {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(l) if l < 0 => return Err(format!("limit must be positive, got {}", l)),
        Some(l) => l.min(MAX_PAGE_SIZE),
    };

    let offset = (page - 1)
        .checked_mul(limit)
        .ok_or_else(|| format!("page {} is out of range", page))?;

    Ok((page, limit, offset))
}

/// Trim and lower-case an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural email check: one `@`, non-empty local part,
/// and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();

    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if email.len() > 254 {
        return Err("email must be at most 254 characters".to_string());
    }
    if email.chars().any(char::is_whitespace) {
        return Err("email must not contain spaces".to_string());
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| format!("invalid email address: {}", email))?;

    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(format!("invalid email address: {}", email));
    }

    Ok(())
}

/// Passwords need at least 8 characters.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("password must be at least 8 characters".to_string());
    }
    Ok(())
}

/// Check a required, length-bounded text field.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters", field, max_len));
    }
    Ok(())
}

/// Truncate a string to a maximum length.
///
/// Useful for logging tokens without printing them whole.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len || max_len < 5 {
        s.to_string()
    } else {
        let half = (max_len - 3) / 2;
        format!("{}...{}", &s[..half], &s[s.len() - half..])
    }
}
