// --- File: crates/payhost_config/src/lib.rs ---
//! Unified configuration loading for the Payhost services.
//!
//! Configuration is layered: `config/default.*`, then an optional
//! `config/{RUN_MODE}.*` file, then environment variables with the
//! `PAYHOST` prefix and `__` separator (e.g. `PAYHOST__SERVER__PORT`).
//! Secrets (the PayFast passphrase) are read from plain env vars at the
//! use site and never appear in config files.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod models;

pub use models::{AppConfig, PayfastConfig, ServerConfig};

/// The prefix for configuration environment variables
pub const ENV_PREFIX: &str = "PAYHOST";

/// The separator for configuration environment variables
pub const ENV_SEPARATOR: &str = "__";

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads `.env` once per process. Later calls are no-ops.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        if dotenv::dotenv().is_err() {
            tracing::debug!("no .env file found, relying on process environment");
        }
    });
}

/// Loads the application configuration from files and environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_base_prefers_explicit_override() {
        let config = PayfastConfig {
            merchant_id: "10000100".into(),
            merchant_key: "46f0cd694581a".into(),
            sandbox: true,
            base_url: Some("http://127.0.0.1:9000/".into()),
            public_base_url: "http://localhost:3000".into(),
        };
        assert_eq!(config.gateway_base(), "http://127.0.0.1:9000");
    }

    #[test]
    fn gateway_base_follows_sandbox_flag() {
        let mut config = PayfastConfig {
            merchant_id: "10000100".into(),
            merchant_key: "46f0cd694581a".into(),
            sandbox: true,
            base_url: None,
            public_base_url: "http://localhost:3000".into(),
        };
        assert_eq!(config.gateway_base(), models::PAYFAST_SANDBOX_BASE);
        config.sandbox = false;
        assert_eq!(config.gateway_base(), models::PAYFAST_LIVE_BASE);
    }
}
