// --- File: crates/payhost_payfast/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod ipn;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;
pub mod signature;
pub mod store;

pub use error::PayfastError;
pub use ipn::{IpnOutcome, IpnVerifier};
pub use routes::routes;
pub use signature::{generate_signature, ParameterSet};
pub use store::{InMemoryStore, PaymentStore};
