//! Configuration for the payment button renderer

/// Default CSS class of the payment button
pub const DEFAULT_BUTTON_CLASS: &str = "shopier-payment-button";

/// Default inline style of the payment button
pub const DEFAULT_BUTTON_STYLE: &str = "background-color:#4caf50;color:#ffffff;border:none;\
border-radius:6px;padding:12px 24px;font-size:16px;cursor:pointer;";

/// Button customization; unset fields use the defaults above and a localized label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonConfig {
    pub label: Option<String>,
    pub css_class: Option<String>,
    pub style: Option<String>,
}

impl ButtonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ButtonConfigBuilder {
        ButtonConfigBuilder::new()
    }

    pub(crate) fn css_class(&self) -> &str {
        self.css_class.as_deref().unwrap_or(DEFAULT_BUTTON_CLASS)
    }

    pub(crate) fn style(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_BUTTON_STYLE)
    }
}

/// Builder for [`ButtonConfig`]
#[derive(Debug, Clone, Default)]
pub struct ButtonConfigBuilder {
    label: Option<String>,
    css_class: Option<String>,
    style: Option<String>,
}

impl ButtonConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the button label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the CSS class
    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Set the inline style
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn build(self) -> ButtonConfig {
        ButtonConfig {
            label: self.label,
            css_class: self.css_class,
            style: self.style,
        }
    }
}
