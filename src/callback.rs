//! Verification of gateway payment notifications
//!
//! The gateway may deliver the same notification more than once. Nothing
//! here remembers what was verified; callers deduplicate by order id.

use crate::crypto::signature;
use crate::types::{CallbackNotification, CallbackResult};
use crate::{Result, ShopierError};
use futures_util::{future::ready, stream::once};
use std::collections::HashMap;
use tracing::{info, warn};

/// Status value reported for a completed payment
pub const STATUS_SUCCESS: &str = "success";

/// Status value reported for a failed or abandoned payment
pub const STATUS_FAILED: &str = "failed";

/// Authenticate `notification` with `api_secret` and decode it
pub fn verify_callback(api_secret: &str, notification: &CallbackNotification) -> Result<CallbackResult> {
    let message = signature::callback_message(
        &notification.random_nr,
        &notification.platform_order_id,
    );
    if !signature::verify(api_secret, &message, &notification.signature) {
        warn!(
            order_id = %notification.platform_order_id,
            "rejected callback with invalid signature"
        );
        return Err(ShopierError::signature_validation(
            &notification.platform_order_id,
        ));
    }

    let result = CallbackResult {
        success: notification.status == STATUS_SUCCESS,
        order_id: notification.platform_order_id.clone(),
        payment_id: notification.payment_id.clone(),
        installment: parse_installment(&notification.installment),
        platform_order_id: notification.platform_order_id.clone(),
        status: notification.status.clone(),
    };

    info!(
        order_id = %result.order_id,
        payment_id = %result.payment_id,
        success = result.success,
        "verified callback"
    );
    Ok(result)
}

/// Decode a notification body by its `Content-Type`.
///
/// JSON and `multipart/form-data` bodies are recognised by their media type;
/// anything else is read as `application/x-www-form-urlencoded`.
pub async fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<CallbackNotification> {
    let media_type = content_type
        .map(|ct| ct.trim_start().to_ascii_lowercase())
        .unwrap_or_default();

    if media_type.starts_with("application/json") {
        CallbackNotification::from_json(body)
    } else if media_type.starts_with("multipart/form-data") {
        decode_multipart(content_type.unwrap_or_default(), body).await
    } else {
        Ok(CallbackNotification::from_form_urlencoded(body))
    }
}

/// Text parts of a `multipart/form-data` body; file parts are skipped
async fn decode_multipart(content_type: &str, body: &[u8]) -> Result<CallbackNotification> {
    let boundary = multer::parse_boundary(content_type).map_err(malformed)?;
    let stream = once(ready(Ok::<_, std::io::Error>(body.to_vec())));
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if field.file_name().is_none() {
            fields.insert(name, field.text().await.map_err(malformed)?);
        }
    }

    Ok(CallbackNotification::from_fields(fields))
}

fn malformed(e: multer::Error) -> ShopierError {
    ShopierError::validation(format!("Malformed callback body: {}", e))
}

/// Leading-integer parse: `"3"` and `"3 ay"` give 3, anything unparsable
/// gives 0. Digit runs beyond the `i32` range saturate.
pub fn parse_installment(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let negative = trimmed.starts_with('-');
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return 0;
    }

    trimmed[..sign_len + digits_len]
        .parse()
        .unwrap_or(if negative { i32::MIN } else { i32::MAX })
}
