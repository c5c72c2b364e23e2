// --- File: crates/payhost_payfast/src/doc.rs ---
#![allow(dead_code)] // Allow dead code for doc functions

#[cfg(feature = "openapi")]
use crate::logic::{CheckoutRequest, SubscriptionRequest};
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

// Define dummy functions with the handlers' attributes for utoipa
#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/api/payfast/create-payment",
    request_body(content = CheckoutRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Redirect form to the hosted checkout", content_type = "text/html"),
        (status = 400, description = "Bad request (e.g., invalid amount)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "PayFast"
)]
fn doc_create_payment_handler() {}

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/api/payfast/create-subscription",
    request_body(content = SubscriptionRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Redirect form to the hosted checkout", content_type = "text/html"),
        (status = 400, description = "Bad request (e.g., missing frequency)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "PayFast"
)]
fn doc_create_subscription_handler() {}

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/api/payfast/ipn",
    responses(
        (status = 200, description = "Notification acknowledged; verification runs asynchronously")
    ),
    tag = "PayFast Webhooks"
)]
fn doc_ipn_handler() {}

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_payment_handler,
        doc_create_subscription_handler,
        doc_ipn_handler
    ),
    components(schemas(CheckoutRequest, SubscriptionRequest)),
    tags(
        (name = "PayFast", description = "PayFast Payment Gateway API"),
        (name = "PayFast Webhooks", description = "Server-to-server notification endpoint")
    )
)]
pub struct PayfastApiDoc;
