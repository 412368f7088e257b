//! Axum callback middleware tests
#![cfg(feature = "axum")]

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    middleware,
    routing::post,
    Json, Router,
};
use shopier::axum::{callback_middleware, VerifiedCallback};
use shopier::config::NoEnvironment;
use shopier::crypto::signature;
use shopier::{CallbackResult, Shopier, ShopierConfig};
use std::sync::Arc;
use tower::ServiceExt;

async fn handler(VerifiedCallback(result): VerifiedCallback) -> Json<CallbackResult> {
    Json(result)
}

fn app() -> Router {
    let shopier =
        Shopier::with_environment(ShopierConfig::with_credentials("k", "s"), &NoEnvironment)
            .unwrap();
    Router::new()
        .route("/callback", post(handler))
        .layer(middleware::from_fn_with_state(
            Arc::new(shopier),
            callback_middleware,
        ))
}

fn form_body(signature: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(signature.as_bytes()).collect();
    format!(
        "random_nr=123456&platform_order_id=b1&payment_id=p1&installment=3&status=success&signature={}",
        encoded
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_verified_form_callback_reaches_handler() {
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(&signature::sign("s", "123456b1"))))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["orderId"], "b1");
    assert_eq!(json["paymentId"], "p1");
    assert_eq!(json["installment"], 3);
    assert_eq!(json["platformOrderId"], "b1");
}

#[tokio::test]
async fn test_verified_json_callback() {
    let body = serde_json::json!({
        "random_nr": "123456",
        "platform_order_id": "b1",
        "payment_id": "p1",
        "installment": "0",
        "status": "failed",
        "signature": signature::sign("s", "123456b1"),
    });
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_verified_multipart_callback() {
    let sig = signature::sign("s", "123456b1");
    let mut body = String::new();
    for (name, value) in [
        ("random_nr", "123456"),
        ("platform_order_id", "b1"),
        ("payment_id", "p1"),
        ("installment", "3"),
        ("status", "success"),
        ("signature", sig.as_str()),
    ] {
        body.push_str(&format!(
            "--XYZ\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            name, value
        ));
    }
    body.push_str("--XYZ--\r\n");

    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(Body::from(body))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["installment"], 3);
}

#[tokio::test]
async fn test_bad_signature_is_rejected_without_leaking() {
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body("wrong")))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "SIGNATURE_VALIDATION_ERROR");
    assert!(!json.to_string().contains("wrong"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extractor_without_middleware() {
    let app = Router::new().route("/callback", post(handler));
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
