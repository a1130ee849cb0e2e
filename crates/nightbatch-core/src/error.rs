//! Checkout Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Rejection reasons for a submitted checkout request.
///
/// The `Display` strings are the exact messages the storefront shows, so
/// handlers serialize these straight into the error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// No items submitted.
    #[error("Cart is empty.")]
    EmptyCart,

    /// One or more of name / phone / email is missing.
    #[error("Missing contact info.")]
    MissingContact,

    /// No pickup window selected.
    #[error("Missing pickup window.")]
    MissingPickupWindow,

    /// An item name with no catalog entry. Aborts the whole request.
    #[error("Unrecognized item: {0}")]
    UnrecognizedItem(String),
}
