// --- File: crates/payhost_payfast/src/logic.rs ---
//! Parameter builders for the PayFast hosted checkout.
//!
//! Both builders are pure transforms from a typed request to a signed
//! parameter set ready for the outbound redirect form. They never perform
//! network I/O; talking to the gateway is the payer's browser's job.

use payhost_config::PayfastConfig;
use serde::Deserialize;

use crate::error::PayfastError;
use crate::signature::{generate_signature, ParameterSet, SIGNATURE_FIELD};

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request from our frontend to start a one-off payment.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CheckoutRequest {
    #[cfg_attr(feature = "openapi", schema(example = 49.90))]
    pub amount: f64,
    #[cfg_attr(feature = "openapi", schema(example = "Widget"))]
    pub item_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "customer@example.com"))]
    pub email: Option<String>,
}

/// Request from our frontend to start a recurring subscription.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubscriptionRequest {
    #[cfg_attr(feature = "openapi", schema(example = 49.90))]
    pub amount: f64,
    #[cfg_attr(feature = "openapi", schema(example = "Monthly plan"))]
    pub item_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "customer@example.com"))]
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "user-42"))]
    pub user_id: Option<String>,
    /// PayFast billing frequency code (3 = monthly, 4 = quarterly,
    /// 5 = biannually, 6 = annually)
    #[cfg_attr(feature = "openapi", schema(example = "3"))]
    pub frequency: String,
}

/// The browser-redirect URLs handed to the gateway alongside a payment.
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
}

impl CallbackUrls {
    pub fn payment(public_base_url: &str) -> Self {
        let base = public_base_url.trim_end_matches('/');
        CallbackUrls {
            return_url: format!("{base}/api/payfast/pay-success"),
            cancel_url: format!("{base}/api/payfast/pay-cancel"),
            notify_url: format!("{base}/api/payfast/ipn"),
        }
    }

    pub fn subscription(public_base_url: &str) -> Self {
        let base = public_base_url.trim_end_matches('/');
        CallbackUrls {
            return_url: format!("{base}/api/payfast/subscription-success"),
            cancel_url: format!("{base}/api/payfast/subscription-cancel"),
            notify_url: format!("{base}/api/payfast/ipn"),
        }
    }
}

/// The hosted checkout URL the redirect form posts to.
pub fn process_url(config: &PayfastConfig) -> String {
    format!("{}/eng/process", config.gateway_base())
}

/// The server-to-server endpoint an IPN is re-validated against.
pub fn validate_url(config: &PayfastConfig) -> String {
    format!("{}/eng/query/validate", config.gateway_base())
}

/// Fixed two-decimal rendering of an amount. The gateway compares amounts
/// as strings, so "10" and "10.00" must never both appear on the wire.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn validate_common(
    config: &PayfastConfig,
    amount: f64,
    item_name: &str,
) -> Result<(), PayfastError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PayfastError::InvalidAmount);
    }
    if item_name.trim().is_empty() {
        return Err(PayfastError::MissingField("item_name"));
    }
    if config.merchant_id.trim().is_empty() {
        return Err(PayfastError::MissingField("merchant_id"));
    }
    if config.merchant_key.trim().is_empty() {
        return Err(PayfastError::MissingField("merchant_key"));
    }
    Ok(())
}

fn base_params(
    config: &PayfastConfig,
    urls: &CallbackUrls,
    m_payment_id: &str,
    amount: f64,
    item_name: &str,
    email: Option<&str>,
) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert("merchant_id".to_string(), config.merchant_id.clone());
    params.insert("merchant_key".to_string(), config.merchant_key.clone());
    params.insert("return_url".to_string(), urls.return_url.clone());
    params.insert("cancel_url".to_string(), urls.cancel_url.clone());
    params.insert("notify_url".to_string(), urls.notify_url.clone());
    params.insert("m_payment_id".to_string(), m_payment_id.to_string());
    params.insert("amount".to_string(), format_amount(amount));
    params.insert("item_name".to_string(), item_name.to_string());
    params.insert(
        "email_address".to_string(),
        email.unwrap_or_default().to_string(),
    );
    params
}

/// Builds the signed parameter set for a one-off payment.
pub fn build_payment_params(
    config: &PayfastConfig,
    urls: &CallbackUrls,
    m_payment_id: &str,
    request: &CheckoutRequest,
    passphrase: &str,
) -> Result<ParameterSet, PayfastError> {
    validate_common(config, request.amount, &request.item_name)?;

    let mut params = base_params(
        config,
        urls,
        m_payment_id,
        request.amount,
        &request.item_name,
        request.email.as_deref(),
    );
    let signature = generate_signature(&params, passphrase);
    params.insert(SIGNATURE_FIELD.to_string(), signature);
    Ok(params)
}

/// Builds the signed parameter set for a subscription's initial payment.
/// The recurring amount equals the initial amount and the empty
/// `recurring_cycles` means indefinite, per gateway convention.
pub fn build_subscription_params(
    config: &PayfastConfig,
    urls: &CallbackUrls,
    m_payment_id: &str,
    request: &SubscriptionRequest,
    passphrase: &str,
) -> Result<ParameterSet, PayfastError> {
    validate_common(config, request.amount, &request.item_name)?;
    if request.frequency.trim().is_empty() {
        return Err(PayfastError::MissingField("frequency"));
    }

    let mut params = base_params(
        config,
        urls,
        m_payment_id,
        request.amount,
        &request.item_name,
        request.email.as_deref(),
    );
    params.insert("subscription_type".to_string(), "1".to_string());
    params.insert(
        "recurring_amount".to_string(),
        format_amount(request.amount),
    );
    params.insert(
        "recurring_frequency".to_string(),
        request.frequency.clone(),
    );
    params.insert("recurring_cycles".to_string(), String::new());

    let signature = generate_signature(&params, passphrase);
    params.insert(SIGNATURE_FIELD.to_string(), signature);
    Ok(params)
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the auto-submitting HTML form that forwards the payer's
/// browser to the hosted checkout with the signed parameters.
pub fn render_redirect_form(action_url: &str, params: &ParameterSet) -> String {
    let inputs = params
        .iter()
        .map(|(key, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape_html(key),
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Redirecting to PayFast...</title></head>
  <body>
    <p>Redirecting to PayFast. If you are not redirected, click the button below.</p>
    <form id="payForm" action="{}" method="post">
        {}
        <noscript><button type="submit">Pay with PayFast</button></noscript>
    </form>
    <script>document.getElementById('payForm').submit();</script>
  </body>
</html>"#,
        escape_html(action_url),
        inputs
    )
}
