//! # nightbatch-cart
//!
//! The storefront cart: an ordered list of display-priced line items behind an
//! injectable key-value store (the browser's local-storage slot in production,
//! an in-memory store in tests), plus pickup-window selection and the checkout
//! submit client.
//!
//! Prices held here are display data only. The server re-prices every checkout
//! against its own catalog, so nothing in this crate is trusted for money.

pub mod cart;
pub mod client;
pub mod pickup;
pub mod store;

pub use cart::{BuyerContact, Cart, CartLine, CartView};
pub use client::{CheckoutClient, SubmitError};
pub use pickup::PickupWindow;
pub use store::{KeyValueStore, MemoryStore};
