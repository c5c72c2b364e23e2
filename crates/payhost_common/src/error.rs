// --- File: crates/payhost_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Payhost errors.
///
/// This enum provides a common set of error variants that can be used across
/// all crates. Each crate can extend this by implementing
/// From<SpecificError> for PayhostError.
#[derive(Error, Debug)]
pub enum PayhostError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., state disagreement)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for PayhostError {
    fn status_code(&self) -> u16 {
        match self {
            PayhostError::HttpError(_) => 500,
            PayhostError::ConfigError(_) => 500,
            PayhostError::AuthError(_) => 401,
            PayhostError::ValidationError(_) => 400,
            PayhostError::ExternalServiceError { .. } => 502,
            PayhostError::ConflictError(_) => 409,
            PayhostError::NotFoundError(_) => 404,
            PayhostError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for PayhostError {
    fn from(err: reqwest::Error) -> Self {
        PayhostError::HttpError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> PayhostError {
    PayhostError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> PayhostError {
    PayhostError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> PayhostError {
    PayhostError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> PayhostError {
    PayhostError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> PayhostError {
    PayhostError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> PayhostError {
    PayhostError::InternalError(message.to_string())
}
