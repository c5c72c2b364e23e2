// --- File: crates/payhost_payfast/src/error.rs ---
use payhost_common::{
    conflict, external_service_error, not_found, validation_error, HttpStatusCode, PayhostError,
};
use thiserror::Error;

/// PayFast-specific error types.
///
/// Builder-time variants surface to the caller as 4xx responses;
/// verification-time variants are terminal for the notification being
/// processed and are logged, never sent back to the gateway.
#[derive(Error, Debug)]
pub enum PayfastError {
    /// Amount is not a positive finite number
    #[error("invalid amount: must be a positive number")]
    InvalidAmount,

    /// A required builder field is absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A parameter value is unusable for the requested operation
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Recomputed IPN signature does not match the claimed one
    #[error("IPN signature mismatch")]
    SignatureMismatch,

    /// The gateway's server-to-server validation did not answer VALID
    #[error("gateway validation failed: {0}")]
    ServerValidationFailed(String),

    /// The notification references a payment id we never issued
    #[error("unknown payment id: {0}")]
    UnknownPaymentId(String),

    /// Notification amount disagrees with the stored record
    #[error("amount mismatch: expected {expected}, received {received}")]
    AmountMismatch { expected: String, received: String },

    /// Missing or incomplete PayFast configuration
    #[error("PayFast configuration missing or incomplete")]
    ConfigError,
}

/// Convert PayfastError to PayhostError
impl From<PayfastError> for PayhostError {
    fn from(err: PayfastError) -> Self {
        match err {
            PayfastError::InvalidAmount => validation_error("amount must be a positive number"),
            PayfastError::MissingField(field) => {
                validation_error(format!("missing required field: {}", field))
            }
            PayfastError::InvalidParameter(msg) => validation_error(msg),
            PayfastError::SignatureMismatch => {
                PayhostError::AuthError("IPN signature mismatch".to_string())
            }
            PayfastError::ServerValidationFailed(msg) => {
                external_service_error("PayFast validate", msg)
            }
            PayfastError::UnknownPaymentId(id) => {
                not_found(format!("unknown payment id: {}", id))
            }
            PayfastError::AmountMismatch { expected, received } => conflict(format!(
                "amount mismatch: expected {}, received {}",
                expected, received
            )),
            PayfastError::ConfigError => {
                PayhostError::ConfigError("PayFast configuration missing or incomplete".to_string())
            }
        }
    }
}

/// Implement HttpStatusCode for PayfastError to provide a consistent way to
/// convert PayfastError to HTTP status codes.
impl HttpStatusCode for PayfastError {
    fn status_code(&self) -> u16 {
        match self {
            PayfastError::InvalidAmount => 400,
            PayfastError::MissingField(_) => 400,
            PayfastError::InvalidParameter(_) => 400,
            PayfastError::SignatureMismatch => 401,
            PayfastError::ServerValidationFailed(_) => 502,
            PayfastError::UnknownPaymentId(_) => 404,
            PayfastError::AmountMismatch { .. } => 409,
            PayfastError::ConfigError => 500,
        }
    }
}
