//! # nightbatch-payments
//!
//! Payment processing seam for the nightbatch storefront.
//!
//! The storefront never touches card data: payment is delegated to Stripe's
//! hosted checkout page. This crate owns that boundary — the `PaymentGateway`
//! trait, the Stripe implementation, and a recording mock so the rest of the
//! workspace can prove "no session was created" in tests.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │ Storefront  │────▶│  Stripe Hosted  │────▶│ Storefront  │
//! │ (cart page) │     │  Checkout Page  │     │ (success)   │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! A successful `create_session` call has created a real, billable session at
//! the provider. There is no automatic retry — retrying session creation risks
//! duplicate sessions — so orders carry an optional idempotency key for the
//! cases where a client retry must not double-charge.

mod checkout;
mod error;
mod gateway;

pub use checkout::StripeGateway;
pub use error::{PaymentError, Result};
pub use gateway::{HostedSession, MOCK_CHECKOUT_URL, MockGateway, PaymentGateway};
