//! Axum integration for Shopier callbacks
//!
//! ```no_run
//! use axum::{middleware, routing::post, Router};
//! use shopier::axum::{callback_middleware, VerifiedCallback};
//! use std::sync::Arc;
//!
//! async fn handler(VerifiedCallback(result): VerifiedCallback) -> &'static str {
//!     if result.success { "OK" } else { "FAILED" }
//! }
//!
//! # fn build(shopier: shopier::Shopier) -> Router {
//! Router::new()
//!     .route("/shopier/callback", post(handler))
//!     .layer(middleware::from_fn_with_state(Arc::new(shopier), callback_middleware))
//! # }
//! ```

use crate::callback::decode_body;
use crate::types::CallbackResult;
use crate::{Shopier, ShopierError};
use axum::{
    async_trait,
    body::{to_bytes, Body},
    extract::{FromRequestParts, Request, State},
    http::{header::CONTENT_TYPE, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Largest callback body the middleware buffers
pub const MAX_CALLBACK_BODY: usize = 64 * 1024;

/// Verify the request body as a gateway notification.
///
/// On success the [`CallbackResult`] is stored in the request extensions, the
/// body is restored and the next handler runs. On failure the error becomes
/// the response.
pub async fn callback_middleware(
    State(shopier): State<Arc<Shopier>>,
    request: Request,
    next: Next,
) -> Result<Response, ShopierError> {
    let (mut parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_CALLBACK_BODY)
        .await
        .map_err(|e| ShopierError::validation(format!("Failed to read callback body: {}", e)))?;

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let notification = decode_body(content_type, &bytes).await?;
    let result = shopier.verify_callback(&notification)?;

    parts.extensions.insert(result);
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Verify a callback inside a handler, without the middleware
pub async fn verify_callback_body(
    shopier: &Shopier,
    content_type: Option<&str>,
    body: &[u8],
) -> crate::Result<CallbackResult> {
    shopier.verify_callback(&decode_body(content_type, body).await?)
}

/// Extracts the result stored by [`callback_middleware`]
#[derive(Debug, Clone)]
pub struct VerifiedCallback(pub CallbackResult);

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedCallback
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallbackResult>()
            .cloned()
            .map(VerifiedCallback)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "callback_middleware is not installed on this route",
            ))
    }
}

/// HTTP status answered for `error`
pub fn status_for(error: &ShopierError) -> StatusCode {
    match error {
        ShopierError::SignatureValidation { .. } => StatusCode::UNAUTHORIZED,
        ShopierError::Validation { .. } => StatusCode::BAD_REQUEST,
        ShopierError::InvalidApiKey { .. } | ShopierError::InvalidApiSecret { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ShopierError {
    fn into_response(self) -> Response {
        (status_for(&self), Json(self.to_safe_json())).into_response()
    }
}
