//! # nightbatch-core
//!
//! Trusted domain logic for the nightbatch storefront: the price catalog and
//! the checkout request builder.
//!
//! The rule this crate exists to enforce: a client-submitted price is display
//! data, never a charge amount. Every checkout is re-priced here against the
//! catalog before anything reaches the payment provider.

pub mod catalog;
pub mod checkout;
pub mod error;

pub use catalog::Catalog;
pub use checkout::{
    CheckoutRequest, LineItem, RedirectUrls, SessionOrder, SubmittedItem, build_order,
};
pub use error::{CheckoutError, Result};
