//! Cart Store
//!
//! Ordered list of line items persisted through an injected `KeyValueStore`,
//! mirroring the storefront's local-storage cart slot. Mutations follow
//! load → change → save; concurrent tabs get last-write-wins, same as the
//! browser storage they stand in for.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nightbatch_core::{CheckoutRequest, SubmittedItem};

use crate::pickup::PickupWindow;
use crate::store::KeyValueStore;

/// One cart entry: the display name and the display price in cents.
///
/// The price is what the storefront was showing when the buyer clicked. It
/// travels with the checkout submission for continuity and is ignored by the
/// server, which re-prices from its own catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub price_cents: i64,
}

/// Buyer contact fields collected at checkout time.
#[derive(Clone, Debug, Default)]
pub struct BuyerContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Snapshot handed to the render hook after every mutation.
#[derive(Clone, Debug)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
}

impl CartView {
    /// Display total in dollars.
    pub fn total(&self) -> Decimal {
        Decimal::new(self.total_cents, 2)
    }
}

type RenderHook = Box<dyn Fn(&CartView) + Send + Sync>;

/// The cart itself: load-mutate-save over the injected store.
pub struct Cart {
    store: Arc<dyn KeyValueStore>,
    cart_key: String,
    window_key: String,
    render_hook: Option<RenderHook>,
}

impl Cart {
    /// Cart bound to the default storage slots.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_namespace(store, "nightbatch")
    }

    /// Cart bound to `<namespace>.cart` / `<namespace>.pickup_window`.
    pub fn with_namespace(store: Arc<dyn KeyValueStore>, namespace: &str) -> Self {
        Self {
            store,
            cart_key: format!("{namespace}.cart"),
            window_key: format!("{namespace}.pickup_window"),
            render_hook: None,
        }
    }

    /// Install a hook called with a fresh snapshot after every mutation.
    pub fn on_change(&mut self, hook: impl Fn(&CartView) + Send + Sync + 'static) {
        self.render_hook = Some(Box::new(hook));
    }

    /// Current lines, in insertion order.
    ///
    /// Missing or corrupt storage reads as an empty cart.
    pub fn lines(&self) -> Vec<CartLine> {
        let Some(raw) = self.store.get(&self.cart_key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(error = %err, "stored cart unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn add(&self, name: impl Into<String>, price_cents: i64) {
        let mut lines = self.lines();
        lines.push(CartLine {
            name: name.into(),
            price_cents,
        });
        self.save(lines);
    }

    /// Remove the entry at `index`; out-of-range indices are ignored.
    pub fn remove(&self, index: usize) {
        let mut lines = self.lines();
        if index < lines.len() {
            lines.remove(index);
            self.save(lines);
        }
    }

    pub fn clear(&self) {
        self.store.remove(&self.cart_key);
        self.notify(&[]);
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    pub fn total_cents(&self) -> i64 {
        self.lines().iter().map(|l| l.price_cents).sum()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CartView {
        let lines = self.lines();
        let total_cents = lines.iter().map(|l| l.price_cents).sum();
        CartView { lines, total_cents }
    }

    /// Select a pickup window; unknown codes leave the selection unchanged.
    pub fn set_pickup_window(&self, code: &str) {
        if PickupWindow::from_code(code).is_some() {
            self.store.set(&self.window_key, code);
        }
    }

    /// Selected pickup window, defaulting to the midnight batch.
    pub fn pickup_window(&self) -> PickupWindow {
        self.store
            .get(&self.window_key)
            .and_then(|code| PickupWindow::from_code(&code))
            .unwrap_or_default()
    }

    /// Assemble the checkout submission for the current cart, with a fresh
    /// request nonce so session creation stays idempotent across retries.
    pub fn checkout_request(&self, contact: &BuyerContact) -> CheckoutRequest {
        let items = self
            .lines()
            .into_iter()
            .map(|line| SubmittedItem {
                name: line.name,
                price: Some(line.price_cents as f64 / 100.0),
            })
            .collect();

        CheckoutRequest {
            items,
            pickup_window: self.pickup_window().summary(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            nonce: Some(uuid::Uuid::new_v4().to_string()),
        }
    }

    fn save(&self, lines: Vec<CartLine>) {
        match serde_json::to_string(&lines) {
            Ok(raw) => self.store.set(&self.cart_key, &raw),
            Err(err) => tracing::warn!(error = %err, "failed to serialize cart"),
        }
        self.notify(&lines);
    }

    fn notify(&self, lines: &[CartLine]) {
        if let Some(ref hook) = self.render_hook {
            let total_cents = lines.iter().map(|l| l.price_cents).sum();
            hook(&CartView {
                lines: lines.to_vec(),
                total_cents,
            });
        }
    }
}
