//! Payment Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors from the payment gateway boundary.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The provider rejected or failed the session request.
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Gateway misconfiguration (missing credentials and the like).
    #[error("Configuration error: {0}")]
    Config(String),
}
