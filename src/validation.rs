//! Input validation for credentials and payment options
//!
//! Every function here is pure. The `validate_*` functions return the first
//! problem found as a [`ShopierError`]; `is_valid_email` and `is_valid_phone`
//! are plain predicates.

use crate::types::{BuyerInfo, MAX_INSTALLMENT};
use crate::{Result, ShopierError};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").expect("PHONE_REGEX: invalid regex pattern"));

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("PHONE_SEPARATORS: invalid regex pattern"));

/// Check that both credentials are present; the key is checked first
pub fn validate_credentials(api_key: Option<&str>, api_secret: Option<&str>) -> Result<()> {
    if is_blank(api_key) {
        return Err(ShopierError::invalid_api_key("API key is required"));
    }
    if is_blank(api_secret) {
        return Err(ShopierError::invalid_api_secret("API secret is required"));
    }
    Ok(())
}

/// Check required buyer fields, then email and phone shape
pub fn validate_buyer(buyer: &BuyerInfo) -> Result<()> {
    let required = [
        ("id", &buyer.id),
        ("firstName", &buyer.first_name),
        ("lastName", &buyer.last_name),
        ("email", &buyer.email),
        ("phone", &buyer.phone),
        ("productName", &buyer.product_name),
    ];

    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ShopierError::missing_fields(missing));
    }

    if !is_valid_email(&buyer.email) {
        return Err(ShopierError::invalid_field(
            "Invalid email address",
            "email",
            buyer.email.as_str(),
        ));
    }
    if !is_valid_phone(&buyer.phone) {
        return Err(ShopierError::invalid_field(
            "Invalid phone number",
            "phone",
            buyer.phone.as_str(),
        ));
    }

    Ok(())
}

/// Amount must be finite and strictly positive
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ShopierError::invalid_field(
            "Amount must be a finite number greater than zero",
            "amount",
            amount_detail(amount),
        ));
    }
    Ok(())
}

/// Installment count must lie in `0..=12`
pub fn validate_installment(count: i32) -> Result<()> {
    if !(0..=MAX_INSTALLMENT).contains(&count) {
        return Err(ShopierError::invalid_field(
            format!("Installment must be between 0 and {}", MAX_INSTALLMENT),
            "maxInstallment",
            count,
        ));
    }
    Ok(())
}

/// `local@domain.tld` shape after trimming
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// 7 to 15 digits once spaces, dashes, parentheses and a leading `+` are removed
pub fn is_valid_phone(phone: &str) -> bool {
    let stripped = PHONE_SEPARATORS.replace_all(phone.trim(), "");
    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);
    PHONE_REGEX.is_match(digits)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// JSON has no NaN or infinity, so those are carried as text.
fn amount_detail(amount: f64) -> serde_json::Value {
    serde_json::Number::from_f64(amount)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(amount.to_string()))
}
