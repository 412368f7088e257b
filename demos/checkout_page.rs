//! Render a signed checkout page and print it
//!
//! Credentials come from `SHOPIER_API_KEY` / `SHOPIER_API_SECRET`.

use shopier::{Address, BuyerInfo, ButtonConfig, Currency, PaymentOptions, Shopier};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let shopier = Shopier::from_env()?;

    let buyer = BuyerInfo::new(
        "customer-1001",
        "Ahmet",
        "Yılmaz",
        "ahmet@example.com",
        "+90 555 123 45 67",
        "Premium Plan",
    )
    .with_order_id("order-2024-0001")
    .with_account_age(120);

    let options = PaymentOptions::new(249.90, buyer)
        .with_currency(Currency::Try)
        .with_max_installment(6)
        .with_billing_address(Address::new(
            "Bağdat Caddesi No:1",
            "İstanbul",
            "Türkiye",
            "34728",
        ));

    let request = shopier.create_payment(&options)?;

    println!("--- auto-submit page ---\n{}", request.html);
    println!(
        "\n--- button fragment ---\n{}",
        request.button_html(&ButtonConfig::builder().label("Şimdi Öde").build())
    );
    println!(
        "\n--- form data ---\n{}",
        serde_json::to_string_pretty(&request.form_data())?
    );

    Ok(())
}
