//! Pickup Windows
//!
//! Buyer-selected fulfillment slots. The label/time pair travels to checkout
//! as an opaque string; nothing validates it against a schedule.

/// A hand-off time slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupWindow {
    /// Stable identifier persisted in the store.
    pub code: &'static str,

    /// Batch label shown to the buyer.
    pub label: &'static str,

    /// Human-readable time range.
    pub time: &'static str,

    /// Hand-off hint shown under the selector.
    pub hint: &'static str,
}

impl PickupWindow {
    pub const MIDNIGHT: Self = Self {
        code: "midnight",
        label: "Midnight Batch",
        time: "12 AM – 1 AM",
        hint: "bakery-door hand-off straight out of the midnight bake",
    };

    pub const DAWN: Self = Self {
        code: "dawn",
        label: "Dawn Batch",
        time: "5 AM – 6 AM",
        hint: "early hand-off, fewer people around",
    };

    pub const NOON: Self = Self {
        code: "noon",
        label: "Noon Batch",
        time: "12 PM – 1 PM",
        hint: "casual hand-off, more public",
    };

    /// All selectable windows, in display order.
    pub fn all() -> [Self; 3] {
        [Self::MIDNIGHT, Self::DAWN, Self::NOON]
    }

    /// Look up a window by its persisted code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|w| w.code == code)
    }

    /// Selector line, e.g. `"Midnight Batch | 12 AM – 1 AM"` — the string
    /// that travels in the checkout submission.
    pub fn summary(&self) -> String {
        format!("{} | {}", self.label, self.time)
    }
}

impl Default for PickupWindow {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}
