// --- File: crates/payhost_payfast/src/handlers.rs ---
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};
use payhost_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::PayfastError;
use crate::ipn::IpnVerifier;
use crate::logic::{
    build_payment_params, build_subscription_params, process_url, render_redirect_form,
    validate_url, CallbackUrls, CheckoutRequest, SubscriptionRequest,
};
use crate::signature::ParameterSet;
use crate::store::{new_payment_id, Order, PaymentStore, RecordStatus, Subscription};

// --- State for PayFast Handlers ---
#[derive(Clone)]
pub struct PayfastState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn PaymentStore>,
}

/// The shared passphrase, read from the environment at the use site like
/// the other gateway secrets. May legitimately be empty.
fn passphrase_from_env() -> String {
    std::env::var("PAYFAST_PASSPHRASE").unwrap_or_default()
}

fn builder_error_response(err: PayfastError) -> (StatusCode, String) {
    match err {
        PayfastError::InvalidAmount
        | PayfastError::MissingField(_)
        | PayfastError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        PayfastError::ConfigError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "PayFast configuration error on server.".to_string(),
        ),
        other => {
            warn!(error = %other, "unexpected error building checkout parameters");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected server error".to_string(),
            )
        }
    }
}

/// Axum handler to create a one-off payment and redirect the payer to the
/// hosted checkout.
#[axum::debug_handler]
pub async fn create_payment_handler(
    State(state): State<Arc<PayfastState>>,
    Form(payload): Form<CheckoutRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    if !state.config.use_payfast {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "PayFast service is disabled.".to_string(),
        ));
    }
    let payfast_config = state.config.payfast.as_ref().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "PayFast configuration not loaded.".to_string(),
    ))?;

    let m_payment_id = new_payment_id("ord");
    let urls = CallbackUrls::payment(&payfast_config.public_base_url);
    let params = build_payment_params(
        payfast_config,
        &urls,
        &m_payment_id,
        &payload,
        &passphrase_from_env(),
    )
    .map_err(builder_error_response)?;

    state.store.insert_order(
        &m_payment_id,
        Order {
            amount: payload.amount,
            item_name: payload.item_name.clone(),
            email: payload.email.clone(),
            status: RecordStatus::Pending,
        },
    );
    info!(payment_id = %m_payment_id, "created pending order");

    Ok(Html(render_redirect_form(
        &process_url(payfast_config),
        &params,
    )))
}

/// Axum handler to create a subscription (initial payment).
#[axum::debug_handler]
pub async fn create_subscription_handler(
    State(state): State<Arc<PayfastState>>,
    Form(payload): Form<SubscriptionRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    if !state.config.use_payfast {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "PayFast service is disabled.".to_string(),
        ));
    }
    let payfast_config = state.config.payfast.as_ref().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "PayFast configuration not loaded.".to_string(),
    ))?;

    let m_payment_id = new_payment_id("sub");
    let urls = CallbackUrls::subscription(&payfast_config.public_base_url);
    let params = build_subscription_params(
        payfast_config,
        &urls,
        &m_payment_id,
        &payload,
        &passphrase_from_env(),
    )
    .map_err(builder_error_response)?;

    state.store.insert_subscription(
        &m_payment_id,
        Subscription {
            user_id: payload.user_id.clone(),
            amount: payload.amount,
            item_name: payload.item_name.clone(),
            email: payload.email.clone(),
            frequency: payload.frequency.clone(),
            status: RecordStatus::Pending,
        },
    );
    info!(payment_id = %m_payment_id, "created pending subscription");

    Ok(Html(render_redirect_form(
        &process_url(payfast_config),
        &params,
    )))
}

/// Axum handler for the gateway's IPN callback.
///
/// The gateway expects a fast acknowledgment independent of the
/// verification outcome, so the pipeline runs as a detached task with its
/// own error boundary and this handler answers 200 unconditionally.
#[axum::debug_handler]
pub async fn ipn_handler(
    State(state): State<Arc<PayfastState>>,
    Form(notification): Form<ParameterSet>,
) -> StatusCode {
    let Some(payfast_config) = state.config.payfast.as_ref() else {
        warn!("IPN received but PayFast configuration is not loaded");
        return StatusCode::OK;
    };
    if !state.config.use_payfast {
        warn!("IPN received while PayFast service is disabled");
        return StatusCode::OK;
    }

    let verifier = IpnVerifier::new(
        validate_url(payfast_config),
        passphrase_from_env(),
        state.store.clone(),
    );
    tokio::spawn(async move {
        match verifier.process(notification).await {
            Ok(outcome) => info!(?outcome, "IPN processed"),
            // Terminal for this notification; the gateway's own retry
            // policy is the sole recovery mechanism.
            Err(err) => warn!(error = %err, "IPN rejected"),
        }
    });

    StatusCode::OK
}

// --- Redirect Handlers (Client-Side) ---
// These are the return_url and cancel_url handed to the gateway. The
// payer never sees verification internals here.

#[axum::debug_handler]
pub async fn payment_success_handler() -> Html<&'static str> {
    Html("<h1>Payment Successful!</h1><p>Thank you for your payment. Your order is being processed.</p><a href='/'>Back to Home</a>")
}

#[axum::debug_handler]
pub async fn payment_cancel_handler() -> Html<&'static str> {
    Html("<h1>Payment Cancelled</h1><p>Your payment process was cancelled. You have not been charged.</p><a href='/'>Back to Home</a>")
}

#[axum::debug_handler]
pub async fn subscription_success_handler() -> Html<&'static str> {
    Html("<h1>Subscription Started!</h1><p>Thank you. Your subscription will be activated once the payment is confirmed.</p><a href='/'>Back to Home</a>")
}

#[axum::debug_handler]
pub async fn subscription_cancel_handler() -> Html<&'static str> {
    Html("<h1>Subscription Cancelled</h1><p>Your subscription process was cancelled. You have not been charged.</p><a href='/'>Back to Home</a>")
}
