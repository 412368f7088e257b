//! Core types for Shopier payment requests and callbacks

use crate::{Result, ShopierError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Default Shopier payment endpoint
pub const DEFAULT_GATEWAY_URL: &str = "https://www.shopier.com/ShowProduct/api_pay4.php";

/// Default module version reported in `modul_version`
pub const DEFAULT_MODULE_VERSION: &str = "1.0.4";

/// Upper bound for `max_installment`
pub const MAX_INSTALLMENT: i32 = 12;

/// Currency codes accepted by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Currency {
    #[default]
    Try,
    Usd,
    Eur,
}

impl Currency {
    /// Wire code
    pub fn code(self) -> u8 {
        match self {
            Currency::Try => 0,
            Currency::Usd => 1,
            Currency::Eur => 2,
        }
    }
}

impl TryFrom<u8> for Currency {
    type Error = ShopierError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Currency::Try),
            1 => Ok(Currency::Usd),
            2 => Ok(Currency::Eur),
            _ => Err(ShopierError::invalid_field(
                "Unknown currency code",
                "currency",
                code,
            )),
        }
    }
}

impl From<Currency> for u8 {
    fn from(currency: Currency) -> Self {
        currency.code()
    }
}

/// Display language of the gateway page and the rendered HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Language {
    #[default]
    Turkish,
    English,
}

impl Language {
    /// Wire code
    pub fn code(self) -> u8 {
        match self {
            Language::Turkish => 0,
            Language::English => 1,
        }
    }

    /// HTML `lang` attribute value
    pub fn html_lang(self) -> &'static str {
        match self {
            Language::Turkish => "tr",
            Language::English => "en",
        }
    }
}

impl TryFrom<u8> for Language {
    type Error = ShopierError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Language::Turkish),
            1 => Ok(Language::English),
            _ => Err(ShopierError::invalid_field(
                "Unknown language code",
                "currentLanguage",
                code,
            )),
        }
    }
}

impl From<Language> for u8 {
    fn from(language: Language) -> Self {
        language.code()
    }
}

/// Product classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProductType {
    /// Physical goods that ship
    Real,
    /// Downloadable or otherwise virtual goods
    DownloadableVirtual,
    #[default]
    DefaultDigital,
}

impl ProductType {
    /// Wire code
    pub fn code(self) -> u8 {
        match self {
            ProductType::Real => 0,
            ProductType::DownloadableVirtual => 1,
            ProductType::DefaultDigital => 2,
        }
    }
}

impl TryFrom<u8> for ProductType {
    type Error = ShopierError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ProductType::Real),
            1 => Ok(ProductType::DownloadableVirtual),
            2 => Ok(ProductType::DefaultDigital),
            _ => Err(ShopierError::invalid_field(
                "Unknown product type",
                "productType",
                code,
            )),
        }
    }
}

impl From<ProductType> for u8 {
    fn from(product_type: ProductType) -> Self {
        product_type.code()
    }
}

/// Platform the checkout is displayed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Platform {
    #[default]
    Web,
    Mobile,
}

impl Platform {
    /// Wire code
    pub fn code(self) -> u8 {
        match self {
            Platform::Web => 0,
            Platform::Mobile => 1,
        }
    }
}

impl TryFrom<u8> for Platform {
    type Error = ShopierError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Platform::Web),
            1 => Ok(Platform::Mobile),
            _ => Err(ShopierError::invalid_field(
                "Unknown platform",
                "platform",
                code,
            )),
        }
    }
}

impl From<Platform> for u8 {
    fn from(platform: Platform) -> Self {
        platform.code()
    }
}

/// Index of the merchant website registered with the gateway (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WebsiteIndex(u8);

impl WebsiteIndex {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a checked website index
    pub fn new(index: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&index) {
            Ok(Self(index))
        } else {
            Err(ShopierError::invalid_field(
                format!(
                    "Website index must be between {} and {}",
                    Self::MIN,
                    Self::MAX
                ),
                "websiteIndex",
                index,
            ))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for WebsiteIndex {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for WebsiteIndex {
    type Error = ShopierError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<WebsiteIndex> for u8 {
    fn from(index: WebsiteIndex) -> Self {
        index.0
    }
}

/// Purchaser identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerInfo {
    /// Unique buyer id, also the default order id
    pub id: String,
    /// Merchant order id, falls back to `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub product_name: String,
    /// Overrides the option-level product type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Account age in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_age: Option<u32>,
}

impl BuyerInfo {
    /// Create a buyer with all required fields
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            product_name: product_name.into(),
            ..Default::default()
        }
    }

    /// Set the merchant order id
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Set the product type override
    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    /// Set the account age in days
    pub fn with_account_age(mut self, days: u32) -> Self {
        self.account_age = Some(days);
        self
    }

    /// Order id sent to the gateway
    pub fn effective_order_id(&self) -> &str {
        self.order_id.as_deref().unwrap_or(&self.id)
    }
}

/// Billing or shipping address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub country: String,
    pub postcode: String,
}

impl Address {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        postcode: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            country: country.into(),
            postcode: postcode.into(),
        }
    }
}

/// Options describing a single purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    pub amount: f64,
    pub buyer: BuyerInfo,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub currency: Currency,
    /// 0 means single payment
    #[serde(default)]
    pub max_installment: i32,
    /// Overrides the configured language
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub product_type: ProductType,
    /// Display platform. Typed and kept for callers, but the gateway's
    /// 27-field form has no platform slot, so it is never emitted.
    #[serde(default)]
    pub platform: Platform,
    /// Overrides the configured website index
    #[serde(default)]
    pub website_index: Option<WebsiteIndex>,
    #[serde(default)]
    pub is_in_frame: bool,
    /// Fixed nonce instead of a generated one
    #[serde(default)]
    pub nonce: Option<u32>,
}

impl PaymentOptions {
    /// Create options for `amount` paid by `buyer` with every other setting defaulted
    pub fn new(amount: f64, buyer: BuyerInfo) -> Self {
        Self {
            amount,
            buyer,
            billing_address: None,
            shipping_address: None,
            currency: Currency::default(),
            max_installment: 0,
            language: None,
            product_type: ProductType::default(),
            platform: Platform::default(),
            website_index: None,
            is_in_frame: false,
            nonce: None,
        }
    }

    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    pub fn with_shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = Some(address);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_max_installment(mut self, max_installment: i32) -> Self {
        self.max_installment = max_installment;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_website_index(mut self, website_index: WebsiteIndex) -> Self {
        self.website_index = Some(website_index);
        self
    }

    pub fn with_in_frame(mut self, is_in_frame: bool) -> Self {
        self.is_in_frame = is_in_frame;
        self
    }

    /// Use a fixed nonce, mainly for deterministic tests
    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

/// Notification POSTed by the gateway once the buyer finishes
///
/// Numeric JSON values are kept as their literal text, since `random_nr` and
/// `platform_order_id` enter the signed message exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackNotification {
    #[serde(deserialize_with = "string_or_number")]
    pub random_nr: String,
    #[serde(deserialize_with = "string_or_number")]
    pub platform_order_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub payment_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub installment: String,
    pub status: String,
    pub signature: String,
}

impl CallbackNotification {
    /// Decode an `application/x-www-form-urlencoded` body.
    ///
    /// Missing fields decode as empty strings and unknown fields are ignored.
    pub fn from_form_urlencoded(body: &[u8]) -> Self {
        Self::from_fields(url::form_urlencoded::parse(body).into_owned().collect())
    }

    /// Build from already-decoded form fields; missing ones become empty
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let mut take = |key: &str| fields.remove(key).unwrap_or_default();

        Self {
            random_nr: take("random_nr"),
            platform_order_id: take("platform_order_id"),
            payment_id: take("payment_id"),
            installment: take("installment"),
            status: take("status"),
            signature: take("signature"),
        }
    }

    /// Decode a JSON body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            ShopierError::validation(format!("Malformed callback body: {}", e))
        })
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Decoded outcome of a verified callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResult {
    /// True iff `status` is `success`
    pub success: bool,
    pub order_id: String,
    pub payment_id: String,
    pub installment: i32,
    pub platform_order_id: String,
    pub status: String,
}
