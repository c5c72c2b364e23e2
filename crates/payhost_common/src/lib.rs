// --- File: crates/payhost_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, external_service_error, internal_error, not_found, validation_error,
    HttpStatusCode, PayhostError,
};

// Re-export HTTP utilities for easier access
pub use http::HTTP_CLIENT;
