// --- File: crates/payhost_payfast/src/ipn.rs ---
//! The IPN verification pipeline.
//!
//! An inbound notification passes three independent gates before it may
//! touch stored state: the recomputed signature must match the claimed
//! one, the gateway must confirm the payload server-to-server, and the
//! amount must reconcile against the stored record. The IPN channel
//! itself is unauthenticated transport, so the signature alone is not
//! enough; the server-to-server round trip defeats replay of a
//! once-valid payload.

use constant_time_eq::constant_time_eq;
use payhost_common::HTTP_CLIENT;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::PayfastError;
use crate::logic::format_amount;
use crate::signature::{generate_signature, notification_body, ParameterSet, SIGNATURE_FIELD};
use crate::store::{PaymentStore, RecordStatus, StoredRecord};

/// The only payment status that mutates stored state.
pub const PAYMENT_STATUS_COMPLETE: &str = "COMPLETE";

/// Response body the gateway answers for an authentic notification.
const VALIDATE_OK: &str = "VALID";

/// Bound on the server-to-server validation call. Expiry is treated
/// identically to a non-VALID response.
const VALIDATE_TIMEOUT_SECS: u64 = 10;

/// What a successfully processed notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpnOutcome {
    /// A COMPLETE notification marked an order paid.
    OrderPaid(String),
    /// A COMPLETE notification activated a subscription.
    SubscriptionActivated(String),
    /// An authentic notification with a non-COMPLETE status; observed and
    /// logged, no state mutated.
    Observed {
        payment_id: String,
        payment_status: String,
    },
}

/// Stateless verifier; all state lives behind the injected store.
pub struct IpnVerifier {
    validate_url: String,
    passphrase: String,
    store: Arc<dyn PaymentStore>,
}

impl IpnVerifier {
    pub fn new(validate_url: String, passphrase: String, store: Arc<dyn PaymentStore>) -> Self {
        IpnVerifier {
            validate_url,
            passphrase,
            store,
        }
    }

    /// Runs the full pipeline for one notification. Exactly one outbound
    /// network call and at most one store mutation.
    pub async fn process(&self, notification: ParameterSet) -> Result<IpnOutcome, PayfastError> {
        self.check_signature(&notification)?;
        self.server_validate(&notification).await?;
        self.reconcile(&notification)
    }

    fn check_signature(&self, notification: &ParameterSet) -> Result<(), PayfastError> {
        let claimed = notification
            .get(SIGNATURE_FIELD)
            .map(String::as_str)
            .unwrap_or_default();
        let expected = generate_signature(notification, &self.passphrase);
        if claimed.is_empty() || !constant_time_eq(claimed.as_bytes(), expected.as_bytes()) {
            warn!(
                payment_id = notification.get("m_payment_id").map(String::as_str),
                expected = %expected,
                received = %claimed,
                "IPN signature mismatch"
            );
            return Err(PayfastError::SignatureMismatch);
        }
        Ok(())
    }

    async fn server_validate(&self, notification: &ParameterSet) -> Result<(), PayfastError> {
        let body = notification_body(notification);
        let response = HTTP_CLIENT
            .post(&self.validate_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .timeout(Duration::from_secs(VALIDATE_TIMEOUT_SECS))
            .body(body)
            .send()
            .await
            .map_err(|err| PayfastError::ServerValidationFailed(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| PayfastError::ServerValidationFailed(err.to_string()))?;

        if !status.is_success() || text.trim() != VALIDATE_OK {
            warn!(
                payment_id = notification.get("m_payment_id").map(String::as_str),
                http_status = %status,
                response = %text.trim(),
                "IPN server-to-server validation failed"
            );
            return Err(PayfastError::ServerValidationFailed(format!(
                "status {}, body {:?}",
                status,
                text.trim()
            )));
        }
        Ok(())
    }

    fn reconcile(&self, notification: &ParameterSet) -> Result<IpnOutcome, PayfastError> {
        let payment_id = notification
            .get("m_payment_id")
            .cloned()
            .unwrap_or_default();

        let record = self.store.get(&payment_id).ok_or_else(|| {
            warn!(payment_id = %payment_id, "IPN received for unknown payment id");
            PayfastError::UnknownPaymentId(payment_id.clone())
        })?;

        let received_amount: f64 = notification
            .get("amount")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0.0);
        let expected = format_amount(record.amount());
        let received = format_amount(received_amount);
        if expected != received {
            // A mismatch must never silently update status; leave the
            // record untouched.
            warn!(
                payment_id = %payment_id,
                expected = %expected,
                received = %received,
                "IPN amount mismatch"
            );
            return Err(PayfastError::AmountMismatch { expected, received });
        }

        let payment_status = notification
            .get("payment_status")
            .cloned()
            .unwrap_or_default();
        if payment_status != PAYMENT_STATUS_COMPLETE {
            info!(
                payment_id = %payment_id,
                payment_status = %payment_status,
                "IPN observed without status change"
            );
            return Ok(IpnOutcome::Observed {
                payment_id,
                payment_status,
            });
        }

        match record {
            StoredRecord::Order(_) => {
                self.store.set_status(&payment_id, RecordStatus::Paid);
                info!(payment_id = %payment_id, "order paid");
                Ok(IpnOutcome::OrderPaid(payment_id))
            }
            StoredRecord::Subscription(_) => {
                self.store.set_status(&payment_id, RecordStatus::Active);
                info!(payment_id = %payment_id, "subscription payment complete");
                Ok(IpnOutcome::SubscriptionActivated(payment_id))
            }
        }
    }
}
