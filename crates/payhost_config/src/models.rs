// --- File: crates/payhost_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// PayFast live gateway base URL.
pub const PAYFAST_LIVE_BASE: &str = "https://www.payfast.co.za";
/// PayFast sandbox gateway base URL.
pub const PAYFAST_SANDBOX_BASE: &str = "https://sandbox.payfast.co.za";

// --- PayFast Config ---
// Holds non-secret PayFast config. The passphrase is loaded directly from
// the PAYFAST_PASSPHRASE env var, never from config files.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PayfastConfig {
    pub merchant_id: String,  // Mandatory
    pub merchant_key: String, // Mandatory
    /// Sandbox vs live gateway. Defaults to sandbox so a misconfigured
    /// deployment never hits the live gateway by accident.
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
    /// Explicit gateway base URL override (used by tests to point at a
    /// local mock). Takes precedence over `sandbox`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Public base URL of this service, used to build the return/cancel/
    /// notify callback URLs handed to the gateway.
    pub public_base_url: String,
}

fn default_sandbox() -> bool {
    true
}

impl PayfastConfig {
    /// The gateway base URL for the configured mode, without a trailing slash.
    pub fn gateway_base(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.trim_end_matches('/').to_string();
        }
        if self.sandbox {
            PAYFAST_SANDBOX_BASE.to_string()
        } else {
            PAYFAST_LIVE_BASE.to_string()
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_payfast: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub payfast: Option<PayfastConfig>,
}
