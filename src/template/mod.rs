//! HTML rendering for signed payments
//!
//! Every dynamic value reaches the markup through [`escape_html`], including
//! numeric fields after their string conversion.

pub mod config;
pub mod page;

pub use config::{ButtonConfig, ButtonConfigBuilder};

use crate::payment::PaymentFields;
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Field set plus action URL, unescaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFormData {
    pub action: String,
    pub fields: PaymentFields,
}

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// One hidden input per field, in wire order
pub fn render_hidden_inputs(fields: &PaymentFields) -> String {
    fields
        .entries()
        .iter()
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape_html(name),
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete HTML document that posts the form as soon as it loads
pub fn render_auto_submit(fields: &PaymentFields, action_url: &str, language: Language) -> String {
    let message = escape_html(page::loading_message(language));
    page::auto_submit_template()
        .replace("{lang}", language.html_lang())
        .replace("{title}", &message)
        .replace("{message}", &message)
        .replace("{form}", &render_form(fields, action_url, ""))
}

/// Form fragment with a visible submit button
pub fn render_button(
    fields: &PaymentFields,
    action_url: &str,
    language: Language,
    button: &ButtonConfig,
) -> String {
    let label = button
        .label
        .as_deref()
        .unwrap_or_else(|| page::button_label(language));
    let submit = format!(
        r#"<button type="submit" class="{}" style="{}">{}</button>"#,
        escape_html(button.css_class()),
        escape_html(button.style()),
        escape_html(label)
    );
    render_form(fields, action_url, &submit)
}

/// Field set and action URL as-is; escaping is the consumer's job
pub fn to_plain_object(fields: &PaymentFields, action_url: &str) -> PaymentFormData {
    PaymentFormData {
        action: action_url.to_string(),
        fields: fields.clone(),
    }
}

fn render_form(fields: &PaymentFields, action_url: &str, extra: &str) -> String {
    let mut form = format!(
        r#"<form id="{}" method="post" action="{}">"#,
        page::FORM_ID,
        escape_html(action_url)
    );
    form.push('\n');
    form.push_str(&render_hidden_inputs(fields));
    if !extra.is_empty() {
        form.push('\n');
        form.push_str(extra);
    }
    form.push_str("\n</form>");
    form
}
