//! Price Catalog
//!
//! The server-trusted mapping from item name to canonical price. Client carts
//! carry prices for display only; every charge amount comes from here.

use std::collections::BTreeMap;

/// Immutable item name → price mapping, in integer cents.
///
/// Lookup is exact: names must match what the storefront renders, byte for
/// byte. No case folding, no trimming.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<String, i64>,
}

impl Catalog {
    /// The deployed storefront catalog.
    ///
    /// Names must stay in sync with what the storefront pages render and
    /// submit; anything else is rejected at checkout.
    pub fn storefront() -> Self {
        Self::from_entries([
            ("Midnight Herb Loaf", 2000),
            ("Garlic / Olive Oil Loaf", 2000),
            ("Sweet Loaf (cinnamon/vanilla)", 2000),
            ("Mini Flashlight (silver)", 600),
            ("Mini Flashlight (black)", 600),
            ("Crew Socks (black/white logo)", 1200),
            ("Crew Socks (gray/white logo)", 1200),
        ])
    }

    /// Build a catalog from `(name, cents)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(n, c)| (n.into(), c)).collect(),
        }
    }

    /// Canonical price in cents, if the name is sold here.
    pub fn price_cents(&self, name: &str) -> Option<i64> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct items for sale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, cents)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }
}
