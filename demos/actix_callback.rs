//! Actix-web server receiving Shopier payment notifications

use actix_web::{web, App, HttpResponse, HttpServer};
use shopier::actix_web::VerifiedCallback;
use shopier::Shopier;

async fn payment_callback(VerifiedCallback(result): VerifiedCallback) -> HttpResponse {
    tracing::info!(
        order_id = %result.order_id,
        success = result.success,
        "payment notification"
    );
    HttpResponse::Ok().body("success")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let shopier = Shopier::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let shopier = web::Data::new(shopier);

    HttpServer::new(move || {
        App::new()
            .app_data(shopier.clone())
            .route("/shopier/callback", web::post().to(payment_callback))
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
