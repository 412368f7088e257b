//! Performance tests for shopier

use std::time::Instant;
use shopier::{
    config::NoEnvironment, crypto::signature, BuyerInfo, CallbackNotification, PaymentOptions,
    Shopier, ShopierConfig,
};

fn client() -> Shopier {
    Shopier::with_environment(ShopierConfig::with_credentials("k", "s"), &NoEnvironment).unwrap()
}

#[test]
#[ignore = "wall-clock bound; run with --ignored on a release build"]
fn test_signature_performance() {
    let iterations = 1000;
    let start = Instant::now();

    for i in 0..iterations {
        let sig = signature::sign("s", &format!("123456order-{}99.990", i));
        assert!(signature::verify("s", &format!("123456order-{}99.990", i), &sig));
    }

    let duration = start.elapsed();
    let avg_time = duration.as_nanos() / iterations as u128;

    println!("Sign + verify: {}ns per operation", avg_time);
    assert!(avg_time < 1_000_000); // Should be under 1ms per operation
}

#[test]
#[ignore = "wall-clock bound; run with --ignored on a release build"]
fn test_create_payment_performance() {
    let shopier = client();
    let iterations = 500;
    let start = Instant::now();

    for _ in 0..iterations {
        let buyer = BuyerInfo::new("b1", "Ahmet", "Yılmaz", "a@example.com", "05551234567", "Plan");
        let request = shopier.create_payment(&PaymentOptions::new(99.99, buyer)).unwrap();
        assert!(!request.html.is_empty());
    }

    let duration = start.elapsed();
    let avg_time = duration.as_nanos() / iterations as u128;

    println!("Payment creation: {}ns per operation", avg_time);
    assert!(avg_time < 5_000_000); // Should be under 5ms per operation
}

#[test]
fn test_concurrent_verification() {
    let shopier = std::sync::Arc::new(client());
    let notification = CallbackNotification {
        random_nr: "123456".to_string(),
        platform_order_id: "b1".to_string(),
        payment_id: "p1".to_string(),
        installment: "1".to_string(),
        status: "success".to_string(),
        signature: signature::sign("s", "123456b1"),
    };

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shopier = shopier.clone();
            let notification = notification.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    assert!(shopier.verify_callback(&notification).unwrap().success);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
