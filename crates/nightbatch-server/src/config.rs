//! Server configuration loaded from environment variables.
//!
//! ## Required
//! - `STRIPE_SECRET_KEY` - Stripe API secret; never reaches the client
//!
//! ## Optional
//! - `STOREFRONT_ORIGIN` - single origin allowed by CORS (default: the
//!   production storefront)
//! - `SUCCESS_URL` / `CANCEL_URL` - post-payment redirects (default: derived
//!   from the origin)
//! - `BIND_ADDR` - listen address (default: 0.0.0.0:3000)

use thiserror::Error;

use nightbatch_core::RedirectUrls;

/// Default storefront origin allowed to call the API.
pub const DEFAULT_ORIGIN: &str = "https://nightbatchbread.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Server runtime configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Stripe API secret key.
    pub stripe_secret_key: String,

    /// Single origin allowed by CORS. Advisory browser metadata, not an
    /// authentication mechanism.
    pub allowed_origin: String,

    /// Post-payment redirect targets.
    pub redirects: RedirectUrls,

    /// Listen address.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load from the process environment.
    ///
    /// Fails fast when the Stripe secret is absent; there is no degraded
    /// no-payments mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("STRIPE_SECRET_KEY".into()))?;

        let allowed_origin =
            std::env::var("STOREFRONT_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.into());

        let defaults = RedirectUrls::for_origin(&allowed_origin);
        let success = std::env::var("SUCCESS_URL").unwrap_or(defaults.success);
        let cancel = std::env::var("CANCEL_URL").unwrap_or(defaults.cancel);

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

        Ok(Self {
            stripe_secret_key,
            allowed_origin,
            redirects: RedirectUrls { success, cancel },
            bind_addr,
        })
    }
}
