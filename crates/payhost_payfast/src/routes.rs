// --- File: crates/payhost_payfast/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use payhost_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{
    create_payment_handler, create_subscription_handler, ipn_handler, payment_cancel_handler,
    payment_success_handler, subscription_cancel_handler, subscription_success_handler,
    PayfastState,
};
use crate::store::PaymentStore;

/// Creates a router containing all routes for the PayFast feature.
///
/// # Arguments
/// * `config` - Shared application configuration (`Arc<AppConfig>`).
/// * `store` - Shared order/subscription store.
///
/// # Returns
/// An Axum Router configured with PayFast routes and state.
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn PaymentStore>) -> Router {
    let payfast_state = Arc::new(PayfastState { config, store });

    Router::new()
        // API endpoints called by our frontend to start a payment flow
        .route("/payfast/create-payment", post(create_payment_handler))
        .route(
            "/payfast/create-subscription",
            post(create_subscription_handler),
        )
        // Endpoint called by the PayFast SERVER for payment notifications
        .route("/payfast/ipn", post(ipn_handler))
        // Routes for USER BROWSER redirects
        .route("/payfast/pay-success", get(payment_success_handler))
        .route("/payfast/pay-cancel", get(payment_cancel_handler))
        .route(
            "/payfast/subscription-success",
            get(subscription_success_handler),
        )
        .route(
            "/payfast/subscription-cancel",
            get(subscription_cancel_handler),
        )
        .with_state(payfast_state)
}
