//! Cryptographic utilities for Shopier payments

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Smallest generated nonce
pub const NONCE_MIN: u32 = 100_000;

/// Largest generated nonce
pub const NONCE_MAX: u32 = 999_999;

/// HMAC-SHA256 signatures as used by the gateway
pub mod signature {
    use super::*;

    /// Sign `message` with `secret`, returning base64 text
    pub fn sign(secret: &str, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(message.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Check `candidate` against the signature of `message`.
    ///
    /// Length mismatch returns early; equal-length inputs are compared in
    /// constant time. Never fails, only answers.
    pub fn verify(secret: &str, message: &str, candidate: &str) -> bool {
        let expected = sign(secret, message);
        if expected.len() != candidate.len() {
            return false;
        }
        expected.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// Message signed for an outbound payment: nonce, order id, amount, currency
    pub fn payment_message(nonce: &str, order_id: &str, amount: f64, currency_code: u8) -> String {
        format!(
            "{}{}{}{}",
            nonce,
            order_id,
            format_amount(amount),
            currency_code
        )
    }

    /// Message signed by the gateway for a callback: nonce then order id, as received
    pub fn callback_message(nonce: &str, order_id: &str) -> String {
        format!("{}{}", nonce, order_id)
    }
}

/// Nonce generation
pub mod nonce {
    use super::*;
    use rand::{rngs::OsRng, Rng};

    /// Draw a six-digit nonce uniformly from the operating system's CSPRNG
    pub fn generate() -> u32 {
        OsRng.gen_range(NONCE_MIN..=NONCE_MAX)
    }
}

/// Render an amount the way the gateway expects to read it back.
///
/// Shortest round-trip decimal (`99.99`, `100`, `0.5`); exponent form with an
/// explicit sign outside `[1e-6, 1e21)`.
pub fn format_amount(amount: f64) -> String {
    let magnitude = amount.abs();
    if amount == 0.0 || !amount.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return format!("{}", amount);
    }

    let exponent_form = format!("{:e}", amount);
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponent_form,
    }
}
