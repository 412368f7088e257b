//! Error types for the shopier library

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Result type alias for shopier operations
pub type Result<T> = std::result::Result<T, ShopierError>;

/// Structured detail payload attached to an error
pub type ErrorDetails = Map<String, Value>;

/// Marker written in place of sensitive detail values
pub const REDACTED: &str = "[REDACTED]";

/// Detail keys whose values are masked in [`ShopierError::redacted_details`].
///
/// Matching is a case-insensitive substring match on the key.
pub const SENSITIVE_KEYS: &[&str] = &[
    "email",
    "phone",
    "value",
    "password",
    "secret",
    "token",
    "apisecret",
    "apikey",
];

/// Machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidApiKey,
    InvalidApiSecret,
    ValidationError,
    SignatureValidationError,
}

impl ErrorCode {
    /// Get the wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::InvalidApiSecret => "INVALID_API_SECRET",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::SignatureValidationError => "SIGNATURE_VALIDATION_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for shopier operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopierError {
    /// API key missing or blank
    #[error("Invalid API key: {message}")]
    InvalidApiKey {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// API secret missing or blank
    #[error("Invalid API secret: {message}")]
    InvalidApiSecret {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// Malformed payment input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// Callback signature did not match
    #[error("Signature validation failed: {message}")]
    SignatureValidation {
        message: String,
        details: Option<ErrorDetails>,
    },
}

impl ShopierError {
    /// Create an invalid API key error
    pub fn invalid_api_key(message: impl Into<String>) -> Self {
        Self::InvalidApiKey {
            message: message.into(),
            details: None,
        }
    }

    /// Create an invalid API secret error
    pub fn invalid_api_secret(message: impl Into<String>) -> Self {
        Self::InvalidApiSecret {
            message: message.into(),
            details: None,
        }
    }

    /// Create a validation error without details
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Create a validation error naming the offending field and its raw value
    pub fn invalid_field(
        message: impl Into<String>,
        field: &str,
        value: impl Into<Value>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details(json!({ "field": field, "value": value.into() }))),
        }
    }

    /// Create a validation error listing missing fields
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        Self::Validation {
            message: format!("Missing required fields: {}", fields.join(", ")),
            details: Some(details(json!({ "missingFields": fields }))),
        }
    }

    /// Create a signature validation error.
    ///
    /// Only the order id is recorded; signature values never enter the payload.
    pub fn signature_validation(order_id: &str) -> Self {
        Self::SignatureValidation {
            message: "Callback signature does not match".to_string(),
            details: Some(details(json!({ "orderId": order_id }))),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidApiKey { .. } => ErrorCode::InvalidApiKey,
            Self::InvalidApiSecret { .. } => ErrorCode::InvalidApiSecret,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::SignatureValidation { .. } => ErrorCode::SignatureValidationError,
        }
    }

    /// Error kind name
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidApiKey { .. } => "InvalidApiKeyError",
            Self::InvalidApiSecret { .. } => "InvalidApiSecretError",
            Self::Validation { .. } => "ValidationError",
            Self::SignatureValidation { .. } => "SignatureValidationError",
        }
    }

    /// Human-readable message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidApiKey { message, .. }
            | Self::InvalidApiSecret { message, .. }
            | Self::Validation { message, .. }
            | Self::SignatureValidation { message, .. } => message,
        }
    }

    /// Structured detail payload, unredacted
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::InvalidApiKey { details, .. }
            | Self::InvalidApiSecret { details, .. }
            | Self::Validation { details, .. }
            | Self::SignatureValidation { details, .. } => details.as_ref(),
        }
    }

    /// Detail payload with sensitive values masked
    pub fn redacted_details(&self) -> Option<Value> {
        self.details()
            .map(|details| redact(&Value::Object(details.clone())))
    }

    /// Projection intended for logs: name, message, code and redacted details
    pub fn to_safe_json(&self) -> Value {
        let mut safe = json!({
            "name": self.name(),
            "message": self.message(),
            "code": self.code(),
        });
        if let Some(details) = self.redacted_details() {
            safe["details"] = details;
        }
        safe
    }
}

/// Mask values under sensitive keys, recursing through objects and arrays
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    if is_sensitive_key(key) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|needle| key.contains(needle))
}

fn details(value: Value) -> ErrorDetails {
    match value {
        Value::Object(map) => map,
        _ => ErrorDetails::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            ShopierError::invalid_api_key("x").code().as_str(),
            "INVALID_API_KEY"
        );
        assert_eq!(
            ShopierError::invalid_api_secret("x").code().as_str(),
            "INVALID_API_SECRET"
        );
        assert_eq!(
            ShopierError::validation("x").code().as_str(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            ShopierError::signature_validation("b1").code().as_str(),
            "SIGNATURE_VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_redaction_is_case_insensitive_substring() {
        let value = json!({
            "buyerEmail": "a@example.com",
            "PHONE_NUMBER": "0555",
            "apiSecret": "s",
            "field": "amount",
            "nested": { "accessToken": "t", "orderId": "b1" },
            "list": [{ "password": "p" }]
        });

        let redacted = redact(&value);
        assert_eq!(redacted["buyerEmail"], REDACTED);
        assert_eq!(redacted["PHONE_NUMBER"], REDACTED);
        assert_eq!(redacted["apiSecret"], REDACTED);
        assert_eq!(redacted["field"], "amount");
        assert_eq!(redacted["nested"]["accessToken"], REDACTED);
        assert_eq!(redacted["nested"]["orderId"], "b1");
        assert_eq!(redacted["list"][0]["password"], REDACTED);
    }

    #[test]
    fn test_safe_json_masks_raw_value() {
        let error = ShopierError::invalid_field("Invalid email", "email", "not-an-email");
        let safe = error.to_safe_json();

        assert_eq!(safe["name"], "ValidationError");
        assert_eq!(safe["code"], "VALIDATION_ERROR");
        assert_eq!(safe["details"]["field"], "email");
        assert_eq!(safe["details"]["value"], REDACTED);
        assert!(!safe.to_string().contains("not-an-email"));
    }

    #[test]
    fn test_missing_fields_detail() {
        let error = ShopierError::missing_fields(vec!["email", "phone"]);
        let details = error.details().unwrap();
        assert_eq!(details["missingFields"], json!(["email", "phone"]));
        assert!(error.to_string().contains("email, phone"));
    }

    #[test]
    fn test_safe_json_without_details() {
        let safe = ShopierError::invalid_api_key("API key is required").to_safe_json();
        assert_eq!(safe["message"], "API key is required");
        assert!(safe.get("details").is_none());
    }
}
