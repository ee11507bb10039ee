//! Configuration loading and validation for the compute server.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any value cannot be parsed. The AES
//! key itself is not read here: it is resolved per request by the envelope
//! layer so external rotation takes effect without a restart.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated compute-server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// TCP port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Name of the environment variable holding the base64 AES key.
    #[serde(default = "default_aes_key_var")]
    pub aes_key_var: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    5055
}
fn default_aes_key_var() -> String {
    envelope::DEFAULT_KEY_VAR.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.aes_key_var.trim().is_empty() {
            anyhow::bail!("AES_KEY_VAR must not be empty");
        }
        Ok(())
    }
}
