//! Fixed markup and localized text for rendered payment pages

use crate::types::Language;

/// `id` of the generated form element
pub const FORM_ID: &str = "shopier_payment_form";

/// Message shown while the auto-submit page redirects
pub fn loading_message(language: Language) -> &'static str {
    match language {
        Language::Turkish => "Ödeme sayfasına yönlendiriliyorsunuz...",
        Language::English => "Redirecting to the payment page...",
    }
}

/// Default label of the payment button
pub fn button_label(language: Language) -> &'static str {
    match language {
        Language::Turkish => "Güvenli Ödeme Yap",
        Language::English => "Pay Securely",
    }
}

/// Document wrapper for the auto-submit page.
///
/// `{lang}`, `{title}`, `{message}` and `{form}` are substituted with
/// already-escaped text.
pub fn auto_submit_template() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            background: #f8f9fa;
            color: #333;
        }
        .loading { text-align: center; font-size: 1.1rem; }
    </style>
</head>
<body>
    <div class="loading">{message}</div>
{form}
    <script>
        document.getElementById("shopier_payment_form").submit();
    </script>
</body>
</html>"#
}
