//! # shopier - signed checkout requests for the Shopier payment page
//!
//! Builds the signed form a buyer's browser posts to the Shopier hosted
//! payment page, and authenticates the notification Shopier sends back once
//! the buyer has paid or given up.
//!
//! ```no_run
//! use shopier::{BuyerInfo, PaymentOptions, Shopier, ShopierConfig};
//!
//! # fn main() -> shopier::Result<()> {
//! let shopier = Shopier::new(ShopierConfig::with_credentials("key", "secret"))?;
//! let buyer = BuyerInfo::new("b1", "Ahmet", "Yılmaz", "a@example.com", "05551234567", "Plan");
//! let request = shopier.create_payment(&PaymentOptions::new(99.99, buyer))?;
//! println!("{}", request.html);
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payment;
pub mod template;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use config::{EnvironmentProvider, ResolvedConfig, ShopierConfig};
pub use error::{ErrorCode, Result, ShopierError};
pub use payment::{PaymentFields, PaymentRequest};
pub use template::{ButtonConfig, PaymentFormData};
pub use types::*;

// Feature-gated framework support
#[cfg(feature = "axum")]
pub mod axum;

#[cfg(feature = "actix-web")]
pub mod actix_web;

/// Current version of the shopier library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client holding resolved credentials.
///
/// Requests and verifications share no state, so a `Shopier` can sit behind
/// an `Arc` and serve concurrent callers. Credential updates take `&mut self`.
#[derive(Debug, Clone)]
pub struct Shopier {
    config: ResolvedConfig,
}

impl Shopier {
    /// Resolve `config` against the process environment
    pub fn new(config: ShopierConfig) -> Result<Self> {
        Ok(Self {
            config: config.resolve()?,
        })
    }

    /// Resolve `config` against a custom environment
    pub fn with_environment(config: ShopierConfig, env: &impl EnvironmentProvider) -> Result<Self> {
        Ok(Self {
            config: config.resolve_with(env)?,
        })
    }

    /// Credentials from `SHOPIER_API_KEY` / `SHOPIER_API_SECRET`, everything else defaulted
    pub fn from_env() -> Result<Self> {
        Self::new(ShopierConfig::default())
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Validate, sign and render a payment
    pub fn create_payment(&self, options: &PaymentOptions) -> Result<PaymentRequest> {
        payment::create_payment(&self.config, options)
    }

    /// Authenticate and decode a gateway notification
    pub fn verify_callback(&self, notification: &CallbackNotification) -> Result<CallbackResult> {
        callback::verify_callback(&self.config.api_secret, notification)
    }

    /// Sign an arbitrary message with the API secret
    pub fn generate_signature(&self, message: &str) -> String {
        crypto::signature::sign(&self.config.api_secret, message)
    }

    pub fn set_api_key(&mut self, api_key: &str) -> Result<()> {
        self.config.set_api_key(api_key)
    }

    pub fn set_api_secret(&mut self, api_secret: &str) -> Result<()> {
        self.config.set_api_secret(api_secret)
    }

    pub fn set_credentials(&mut self, api_key: &str, api_secret: &str) -> Result<()> {
        self.config.set_credentials(api_key, api_secret)
    }

    pub fn set_language(&mut self, language: Language) {
        self.config.set_language(language);
    }

    pub fn set_website_index(&mut self, index: WebsiteIndex) {
        self.config.set_website_index(index);
    }

    pub fn set_module_version(&mut self, version: impl Into<String>) {
        self.config.set_module_version(version);
    }
}
