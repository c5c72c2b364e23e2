// --- File: crates/payhost_payfast/src/signature.rs ---
//! Canonicalization and signing of PayFast parameter sets.
//!
//! The gateway signs the URL-encoded, key-sorted rendering of a parameter
//! set with an MD5 digest, optionally salted with a shared passphrase.
//! MD5 is mandated by the PayFast protocol for interoperability; it is not
//! a digest choice this crate is free to upgrade.
//!
//! The same encoder serves both the signing string and the transmitted
//! body, so the signed content and the wire content cannot diverge.
//! Spaces encode as `%20`, never `+` (the `encodeURIComponent` variant).

use md5::{Digest, Md5};
use std::collections::BTreeMap;

/// An unordered set of gateway fields. Keys sort in byte-wise
/// lexicographic order, which is stable and locale independent.
pub type ParameterSet = BTreeMap<String, String>;

/// The field carrying the computed signature. Always excluded from the
/// canonicalization input; it is the output of signing, not an input.
pub const SIGNATURE_FIELD: &str = "signature";

/// Renders the canonical string a signature is computed over: the
/// parameter set minus any `signature` entry, keys sorted, values
/// percent-encoded, joined as `key=value` pairs with `&`, with the
/// passphrase appended as a final `&passphrase=` pair when non-empty.
pub fn signing_string(params: &ParameterSet, passphrase: &str) -> String {
    let mut out = params
        .iter()
        .filter(|(key, _)| key.as_str() != SIGNATURE_FIELD)
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    if !passphrase.is_empty() {
        out.push_str(&format!("&passphrase={}", urlencoding::encode(passphrase)));
    }
    out
}

/// Renders the full parameter set, including the claimed `signature`, in
/// the same sorted URL-encoded form. This is the body re-transmitted to
/// the gateway's server-to-server validation endpoint.
pub fn notification_body(params: &ParameterSet) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Computes the MD5 signature of a parameter set as 32 lowercase hex
/// characters. Re-signing an already-signed set reproduces the identical
/// signature because the canonicalizer strips the `signature` field.
pub fn generate_signature(params: &ParameterSet, passphrase: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(signing_string(params, passphrase).as_bytes());
    hex::encode(hasher.finalize())
}
