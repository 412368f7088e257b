//! Client configuration and its resolution against the environment

use crate::types::{Language, WebsiteIndex, DEFAULT_GATEWAY_URL, DEFAULT_MODULE_VERSION};
use crate::validation::validate_credentials;
use crate::{Result, ShopierError};
use std::collections::HashMap;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "SHOPIER_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "SHOPIER_API_SECRET";

/// Source of fallback credential values
pub trait EnvironmentProvider {
    /// Look up a variable; `None` when unset
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentProvider for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Provides nothing, so only explicit values count
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnvironment;

impl EnvironmentProvider for NoEnvironment {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}

impl EnvironmentProvider for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Explicit client configuration; unset fields fall back to the environment or defaults
#[derive(Debug, Clone, Default)]
pub struct ShopierConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub language: Option<Language>,
    pub module_version: Option<String>,
    pub website_index: Option<WebsiteIndex>,
    pub gateway_url: Option<String>,
}

impl ShopierConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with both credentials set
    pub fn with_credentials(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::new().with_api_key(api_key).with_api_secret(api_secret)
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API secret
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set the default language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the module version string
    pub fn with_module_version(mut self, version: impl Into<String>) -> Self {
        self.module_version = Some(version.into());
        self
    }

    /// Set the default website index
    pub fn with_website_index(mut self, index: WebsiteIndex) -> Self {
        self.website_index = Some(index);
        self
    }

    /// Point payments at a different gateway endpoint
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = Some(url.into());
        self
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.resolve_with(&ProcessEnvironment)
    }

    /// Resolve against `env`.
    ///
    /// Per credential: trimmed explicit value, else trimmed environment value.
    /// A missing key is reported before a missing secret.
    pub fn resolve_with(&self, env: &impl EnvironmentProvider) -> Result<ResolvedConfig> {
        let api_key = pick(self.api_key.as_deref(), env.var(API_KEY_ENV));
        let api_secret = pick(self.api_secret.as_deref(), env.var(API_SECRET_ENV));
        validate_credentials(api_key.as_deref(), api_secret.as_deref())?;

        let (Some(api_key), Some(api_secret)) = (api_key, api_secret) else {
            return Err(ShopierError::invalid_api_key("API key is required"));
        };

        Ok(ResolvedConfig {
            api_key,
            api_secret,
            language: self.language.unwrap_or_default(),
            module_version: self
                .module_version
                .clone()
                .unwrap_or_else(|| DEFAULT_MODULE_VERSION.to_string()),
            website_index: self.website_index.unwrap_or_default(),
            gateway_url: self
                .gateway_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        })
    }
}

/// Fully resolved configuration held by a client
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
    pub(crate) language: Language,
    pub(crate) module_version: String,
    pub(crate) website_index: WebsiteIndex,
    pub(crate) gateway_url: String,
}

impl ResolvedConfig {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn module_version(&self) -> &str {
        &self.module_version
    }

    pub fn website_index(&self) -> WebsiteIndex {
        self.website_index
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Replace the API key; blank values are rejected
    pub fn set_api_key(&mut self, api_key: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ShopierError::invalid_api_key("API key cannot be blank"));
        }
        self.api_key = api_key.to_string();
        Ok(())
    }

    /// Replace the API secret; blank values are rejected
    pub fn set_api_secret(&mut self, api_secret: &str) -> Result<()> {
        let api_secret = api_secret.trim();
        if api_secret.is_empty() {
            return Err(ShopierError::invalid_api_secret("API secret cannot be blank"));
        }
        self.api_secret = api_secret.to_string();
        Ok(())
    }

    /// Replace both credentials, leaving the config untouched on error
    pub fn set_credentials(&mut self, api_key: &str, api_secret: &str) -> Result<()> {
        validate_credentials(Some(api_key), Some(api_secret))?;
        self.api_key = api_key.trim().to_string();
        self.api_secret = api_secret.trim().to_string();
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_website_index(&mut self, index: WebsiteIndex) {
        self.website_index = index;
    }

    pub fn set_module_version(&mut self, version: impl Into<String>) {
        self.module_version = version.into();
    }
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("language", &self.language)
            .field("module_version", &self.module_version)
            .field("website_index", &self.website_index)
            .field("gateway_url", &self.gateway_url)
            .finish()
    }
}

fn pick(explicit: Option<&str>, fallback: Option<String>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| {
            fallback
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}
