//! Actix-web integration for Shopier callbacks
//!
//! Register the client as `web::Data<Shopier>` and take [`VerifiedCallback`]
//! as a handler argument, or call [`verify_callback_request`] with the raw
//! body yourself.

use crate::callback::decode_body;
use crate::types::CallbackResult;
use crate::{Result, Shopier, ShopierError};
use ::actix_web::{
    dev::Payload,
    http::{header::CONTENT_TYPE, StatusCode},
    web, FromRequest, HttpRequest, HttpResponse, ResponseError,
};
use std::future::Future;
use std::pin::Pin;

/// Decode and verify the body of a callback request
pub async fn verify_callback_request(
    shopier: &Shopier,
    req: &HttpRequest,
    body: &[u8],
) -> Result<CallbackResult> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    shopier.verify_callback(&decode_body(content_type, body).await?)
}

/// Extractor yielding a verified callback; rejects with the error response otherwise
#[derive(Debug, Clone)]
pub struct VerifiedCallback(pub CallbackResult);

impl FromRequest for VerifiedCallback {
    type Error = ::actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let body = web::Bytes::from_request(&req, payload);

        Box::pin(async move {
            let body = body.await?;
            let shopier = req.app_data::<web::Data<Shopier>>().ok_or_else(|| {
                ::actix_web::error::ErrorInternalServerError(
                    "Shopier client is not registered as app data",
                )
            })?;
            let result = verify_callback_request(shopier.get_ref(), &req, &body).await?;
            Ok(VerifiedCallback(result))
        })
    }
}

impl ResponseError for ShopierError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SignatureValidation { .. } => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidApiKey { .. } | Self::InvalidApiSecret { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_safe_json())
    }
}
