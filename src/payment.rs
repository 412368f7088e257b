//! Payment request assembly
//!
//! [`create_payment`] validates the options, signs them and assembles the
//! canonical field set the gateway expects. Nothing is signed or rendered
//! unless every check passes.

use crate::config::ResolvedConfig;
use crate::crypto::{format_amount, nonce, signature};
use crate::template::{self, ButtonConfig, PaymentFormData};
use crate::types::{Address, Language, PaymentOptions};
use crate::validation::{validate_amount, validate_buyer, validate_installment};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canonical field set POSTed to the gateway.
///
/// Field declaration order is the wire order; `signature` is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    #[serde(rename = "API_key")]
    pub api_key: String,
    pub website_index: u8,
    pub platform_order_id: String,
    pub product_name: String,
    pub product_type: u8,
    pub buyer_name: String,
    pub buyer_surname: String,
    pub buyer_email: String,
    pub buyer_account_age: u32,
    pub buyer_id_nr: String,
    pub buyer_phone: String,
    pub billing_address: String,
    pub billing_city: String,
    pub billing_country: String,
    pub billing_postcode: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_country: String,
    pub shipping_postcode: String,
    pub total_order_value: String,
    pub currency: u8,
    pub max_installment: i32,
    pub is_in_frame: u8,
    pub current_language: u8,
    pub modul_version: String,
    pub random_nr: String,
    pub signature: String,
}

impl PaymentFields {
    /// Number of fields in the canonical set
    pub const LEN: usize = 27;

    /// Wire name and string value of every field, in wire order
    pub fn entries(&self) -> [(&'static str, String); PaymentFields::LEN] {
        [
            ("API_key", self.api_key.clone()),
            ("website_index", self.website_index.to_string()),
            ("platform_order_id", self.platform_order_id.clone()),
            ("product_name", self.product_name.clone()),
            ("product_type", self.product_type.to_string()),
            ("buyer_name", self.buyer_name.clone()),
            ("buyer_surname", self.buyer_surname.clone()),
            ("buyer_email", self.buyer_email.clone()),
            ("buyer_account_age", self.buyer_account_age.to_string()),
            ("buyer_id_nr", self.buyer_id_nr.clone()),
            ("buyer_phone", self.buyer_phone.clone()),
            ("billing_address", self.billing_address.clone()),
            ("billing_city", self.billing_city.clone()),
            ("billing_country", self.billing_country.clone()),
            ("billing_postcode", self.billing_postcode.clone()),
            ("shipping_address", self.shipping_address.clone()),
            ("shipping_city", self.shipping_city.clone()),
            ("shipping_country", self.shipping_country.clone()),
            ("shipping_postcode", self.shipping_postcode.clone()),
            ("total_order_value", self.total_order_value.clone()),
            ("currency", self.currency.to_string()),
            ("max_installment", self.max_installment.to_string()),
            ("is_in_frame", self.is_in_frame.to_string()),
            ("current_language", self.current_language.to_string()),
            ("modul_version", self.modul_version.clone()),
            ("random_nr", self.random_nr.clone()),
            ("signature", self.signature.clone()),
        ]
    }
}

/// A signed payment ready to hand to the buyer's browser
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Signed field set
    pub fields: PaymentFields,
    /// Gateway endpoint the form posts to
    pub action_url: String,
    /// Language used for rendered text
    pub language: Language,
    /// Self-submitting HTML document
    pub html: String,
}

impl PaymentRequest {
    /// Hidden `<input>` elements only
    pub fn hidden_inputs(&self) -> String {
        template::render_hidden_inputs(&self.fields)
    }

    /// Form with a visible submit button
    pub fn button_html(&self, button: &ButtonConfig) -> String {
        template::render_button(&self.fields, &self.action_url, self.language, button)
    }

    /// Unescaped field set and action URL
    pub fn form_data(&self) -> PaymentFormData {
        template::to_plain_object(&self.fields, &self.action_url)
    }
}

/// Validate, sign and render a payment
pub fn create_payment(config: &ResolvedConfig, options: &PaymentOptions) -> Result<PaymentRequest> {
    let fields = build_fields(config, options)?;
    let language = options.language.unwrap_or(config.language);
    let html = template::render_auto_submit(&fields, &config.gateway_url, language);

    Ok(PaymentRequest {
        fields,
        action_url: config.gateway_url.clone(),
        language,
        html,
    })
}

/// Validate and sign a payment without rendering it
pub fn build_fields(config: &ResolvedConfig, options: &PaymentOptions) -> Result<PaymentFields> {
    validate_amount(options.amount)?;
    validate_buyer(&options.buyer)?;
    if options.max_installment != 0 {
        validate_installment(options.max_installment)?;
    }

    let buyer = &options.buyer;
    let random_nr = options.nonce.unwrap_or_else(nonce::generate).to_string();
    let order_id = buyer.effective_order_id();
    let currency = options.currency.code();
    let signature = signature::sign(
        &config.api_secret,
        &signature::payment_message(&random_nr, order_id, options.amount, currency),
    );

    let product_type = buyer.product_type.unwrap_or(options.product_type);
    let billing = options.billing_address.clone().unwrap_or_default();
    let shipping = options
        .shipping_address
        .clone()
        .or_else(|| options.billing_address.clone())
        .unwrap_or_else(Address::default);
    let language = options.language.unwrap_or(config.language);
    let website_index = options.website_index.unwrap_or(config.website_index);

    debug!(
        order_id = order_id,
        random_nr = %random_nr,
        currency = currency,
        "signed payment request"
    );

    Ok(PaymentFields {
        api_key: config.api_key.clone(),
        website_index: website_index.get(),
        platform_order_id: order_id.to_string(),
        product_name: buyer.product_name.clone(),
        product_type: product_type.code(),
        buyer_name: buyer.first_name.clone(),
        buyer_surname: buyer.last_name.clone(),
        buyer_email: buyer.email.clone(),
        buyer_account_age: buyer.account_age.unwrap_or(0),
        buyer_id_nr: buyer.id.clone(),
        buyer_phone: buyer.phone.clone(),
        billing_address: billing.address,
        billing_city: billing.city,
        billing_country: billing.country,
        billing_postcode: billing.postcode,
        shipping_address: shipping.address,
        shipping_city: shipping.city,
        shipping_country: shipping.country,
        shipping_postcode: shipping.postcode,
        total_order_value: format_amount(options.amount),
        currency,
        max_installment: options.max_installment,
        is_in_frame: u8::from(options.is_in_frame),
        current_language: language.code(),
        modul_version: config.module_version.clone(),
        random_nr,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NoEnvironment, ShopierConfig};
    use crate::error::ErrorCode;
    use crate::types::{BuyerInfo, Currency, Platform, ProductType};

    fn config() -> ResolvedConfig {
        ShopierConfig::with_credentials("k", "s")
            .resolve_with(&NoEnvironment)
            .unwrap()
    }

    fn options() -> PaymentOptions {
        PaymentOptions::new(
            99.99,
            BuyerInfo::new(
                "b1",
                "Ahmet",
                "Yılmaz",
                "a@example.com",
                "05551234567",
                "Plan",
            ),
        )
        .with_nonce(123456)
    }

    #[test]
    fn test_signature_over_canonical_message() {
        let fields = build_fields(&config(), &options()).unwrap();
        assert_eq!(fields.signature, signature::sign("s", "123456b199.990"));
        assert_eq!(fields.random_nr, "123456");
        assert_eq!(fields.platform_order_id, "b1");
        assert_eq!(fields.total_order_value, "99.99");
    }

    #[test]
    fn test_order_id_override() {
        let mut opts = options();
        opts.buyer = opts.buyer.with_order_id("order-7");
        let fields = build_fields(&config(), &opts).unwrap();
        assert_eq!(fields.platform_order_id, "order-7");
        assert_eq!(fields.buyer_id_nr, "b1");
        assert_eq!(fields.signature, signature::sign("s", "123456order-799.990"));
    }

    #[test]
    fn test_entries_order_and_count() {
        let fields = build_fields(&config(), &options()).unwrap();
        let entries = fields.entries();
        assert_eq!(entries.len(), 27);
        assert_eq!(entries[0].0, "API_key");
        assert_eq!(entries[25].0, "random_nr");
        assert_eq!(entries[26], ("signature", fields.signature.clone()));
    }

    #[test]
    fn test_serialized_order_matches_entries() {
        let fields = build_fields(&config(), &options()).unwrap();
        let json = serde_json::to_string(&fields).unwrap();
        let mut last = 0;
        for (name, _) in fields.entries() {
            let pos = json.find(&format!("\"{}\":", name)).unwrap();
            assert!(pos >= last, "{} out of order", name);
            last = pos;
        }
    }

    #[test]
    fn test_address_defaults() {
        let billing = Address::new("Street 1", "Istanbul", "TR", "34000");

        let fields = build_fields(&config(), &options()).unwrap();
        assert_eq!(fields.billing_address, "");
        assert_eq!(fields.shipping_city, "");

        let opts = options().with_billing_address(billing.clone());
        let fields = build_fields(&config(), &opts).unwrap();
        assert_eq!(fields.billing_city, "Istanbul");
        assert_eq!(fields.shipping_city, "Istanbul");

        let opts = options()
            .with_billing_address(billing)
            .with_shipping_address(Address::new("Other 2", "Ankara", "TR", "06000"));
        let fields = build_fields(&config(), &opts).unwrap();
        assert_eq!(fields.billing_city, "Istanbul");
        assert_eq!(fields.shipping_city, "Ankara");
    }

    #[test]
    fn test_product_type_priority() {
        let opts = options().with_product_type(ProductType::Real);
        assert_eq!(build_fields(&config(), &opts).unwrap().product_type, 0);

        let mut opts = options().with_product_type(ProductType::Real);
        opts.buyer = opts
            .buyer
            .with_product_type(ProductType::DownloadableVirtual);
        assert_eq!(build_fields(&config(), &opts).unwrap().product_type, 1);

        assert_eq!(build_fields(&config(), &options()).unwrap().product_type, 2);
    }

    #[test]
    fn test_option_overrides() {
        let opts = options()
            .with_currency(Currency::Eur)
            .with_language(Language::English)
            .with_in_frame(true)
            .with_max_installment(6);
        let fields = build_fields(&config(), &opts).unwrap();
        assert_eq!(fields.currency, 2);
        assert_eq!(fields.current_language, 1);
        assert_eq!(fields.is_in_frame, 1);
        assert_eq!(fields.max_installment, 6);
        assert_eq!(fields.signature, signature::sign("s", "123456b199.992"));
    }

    #[test]
    fn test_platform_is_not_emitted() {
        let web = build_fields(&config(), &options()).unwrap();
        let mobile = build_fields(&config(), &options().with_platform(Platform::Mobile)).unwrap();
        assert_eq!(web, mobile);
    }

    #[test]
    fn test_validation_order() {
        let mut opts = options();
        opts.amount = 0.0;
        opts.buyer.email = "broken".to_string();
        let err = build_fields(&config(), &opts).unwrap_err();
        assert_eq!(err.details().unwrap()["field"], "amount");

        let opts = options().with_max_installment(13);
        let err = build_fields(&config(), &opts).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.details().unwrap()["field"], "maxInstallment");
    }

    #[test]
    fn test_generated_nonce() {
        let mut opts = options();
        opts.nonce = None;
        let fields = build_fields(&config(), &opts).unwrap();
        let nonce: u32 = fields.random_nr.parse().unwrap();
        assert!((100_000..=999_999).contains(&nonce));
    }

    #[test]
    fn test_create_payment_renders_html() {
        let request = create_payment(&config(), &options()).unwrap();
        assert!(request.html.contains(&format!(
            "value=\"{}\"",
            request.fields.signature
        )));
        assert_eq!(request.action_url, crate::types::DEFAULT_GATEWAY_URL);
    }
}
