//! Axum server receiving Shopier payment notifications

use axum::{middleware, routing::post, Router};
use shopier::axum::{callback_middleware, VerifiedCallback};
use shopier::Shopier;
use std::sync::Arc;

async fn payment_callback(VerifiedCallback(result): VerifiedCallback) -> &'static str {
    // The gateway may retry; record results idempotently keyed by order id.
    if result.success {
        tracing::info!(order_id = %result.order_id, "payment completed");
    } else {
        tracing::info!(order_id = %result.order_id, "payment failed");
    }
    "success"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let shopier = Arc::new(Shopier::from_env()?);

    let app = Router::new()
        .route("/shopier/callback", post(payment_callback))
        .layer(middleware::from_fn_with_state(shopier, callback_middleware));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
