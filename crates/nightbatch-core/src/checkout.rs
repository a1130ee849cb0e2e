//! Checkout Request Builder
//!
//! Validates a submitted cart and re-prices it against the trusted catalog.
//! Client-supplied prices never survive past deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CheckoutError, Result};

/// One cart entry as the client submits it.
///
/// `price` is whatever the browser cart was displaying when the buyer clicked.
/// It is accepted for wire compatibility and then discarded: unit amounts come
/// from the catalog only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmittedItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Checkout submission from the storefront.
///
/// Every field defaults when absent so that validation, not deserialization,
/// decides which error message the buyer sees.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<SubmittedItem>,

    /// Selected pickup window, e.g. `"Midnight Batch | 12 AM – 1 AM"`.
    /// Opaque here; carried into session metadata for fulfillment.
    #[serde(default)]
    pub pickup_window: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    /// Client-minted request nonce. When present, session creation is
    /// idempotent across retries of the same submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// One priced unit within a session, derived exclusively from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_amount_cents: i64,
    pub quantity: u32,
}

/// Success / cancel redirect targets for the hosted session.
#[derive(Clone, Debug)]
pub struct RedirectUrls {
    /// Carries the provider's `{CHECKOUT_SESSION_ID}` template token,
    /// substituted by the provider at redirect time.
    pub success: String,
    pub cancel: String,
}

impl RedirectUrls {
    /// Standard success/cancel pages under the storefront origin.
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            success: format!("{origin}/success.html?session_id={{CHECKOUT_SESSION_ID}}"),
            cancel: format!("{origin}/cancel.html"),
        }
    }
}

/// Everything the payment gateway needs to mint one hosted session.
#[derive(Clone, Debug)]
pub struct SessionOrder {
    pub line_items: Vec<LineItem>,
    pub customer_email: String,
    pub metadata: BTreeMap<String, String>,
    pub success_url: String,
    pub cancel_url: String,
    pub idempotency_key: Option<String>,
}

/// Validate a submission and re-price it against `catalog`.
///
/// Checks run in the order the storefront expects its error messages: cart
/// contents, contact fields, pickup window, then per-item catalog lookup.
/// The first unrecognized item aborts the whole request; no partial order is
/// ever produced.
pub fn build_order(
    request: &CheckoutRequest,
    catalog: &Catalog,
    redirects: &RedirectUrls,
) -> Result<SessionOrder> {
    if request.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if request.name.is_empty() || request.phone.is_empty() || request.email.is_empty() {
        return Err(CheckoutError::MissingContact);
    }
    if request.pickup_window.is_empty() {
        return Err(CheckoutError::MissingPickupWindow);
    }

    let mut line_items = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let cents = catalog
            .price_cents(&item.name)
            .ok_or_else(|| CheckoutError::UnrecognizedItem(item.name.clone()))?;

        // One unit per cart entry; duplicates stay separate entries.
        line_items.push(LineItem {
            name: item.name.clone(),
            unit_amount_cents: cents,
            quantity: 1,
        });
    }

    let joined_names = request
        .items
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    // The fulfillment bag: who ordered, when they pick up, what they bought.
    let mut metadata = BTreeMap::new();
    metadata.insert("buyer_name".into(), request.name.clone());
    metadata.insert("buyer_phone".into(), request.phone.clone());
    metadata.insert("buyer_email".into(), request.email.clone());
    metadata.insert("pickup_window".into(), request.pickup_window.clone());
    metadata.insert("items".into(), joined_names);

    Ok(SessionOrder {
        line_items,
        customer_email: request.email.clone(),
        metadata,
        success_url: redirects.success.clone(),
        cancel_url: redirects.cancel.clone(),
        idempotency_key: request.nonce.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirects() -> RedirectUrls {
        RedirectUrls::for_origin("https://nightbatchbread.com")
    }

    fn request(items: &[&str]) -> CheckoutRequest {
        CheckoutRequest {
            items: items
                .iter()
                .map(|name| SubmittedItem {
                    name: (*name).to_string(),
                    price: None,
                })
                .collect(),
            pickup_window: "Midnight Batch | 12 AM – 1 AM".into(),
            name: "Jo".into(),
            phone: "555-1234".into(),
            email: "jo@example.com".into(),
            nonce: None,
        }
    }

    #[test]
    fn reprices_from_catalog_ignoring_client_price() {
        let mut req = request(&["Midnight Herb Loaf"]);
        req.items[0].price = Some(0.01);

        let order = build_order(&req, &Catalog::storefront(), &redirects()).unwrap();
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].unit_amount_cents, 2000);
        assert_eq!(order.line_items[0].quantity, 1);
    }

    #[test]
    fn first_unrecognized_item_aborts() {
        let req = request(&["Midnight Herb Loaf", "Focaccia", "Sourdough"]);
        let err = build_order(&req, &Catalog::storefront(), &redirects()).unwrap_err();
        assert_eq!(err, CheckoutError::UnrecognizedItem("Focaccia".into()));
        assert_eq!(err.to_string(), "Unrecognized item: Focaccia");
    }

    #[test]
    fn empty_cart_rejected() {
        let req = request(&[]);
        let err = build_order(&req, &Catalog::storefront(), &redirects()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn empty_cart_wins_over_missing_contact() {
        let mut req = request(&[]);
        req.email.clear();
        let err = build_order(&req, &Catalog::storefront(), &redirects()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn missing_any_contact_field_rejected() {
        let mut no_name = request(&["Midnight Herb Loaf"]);
        no_name.name.clear();
        let mut no_phone = request(&["Midnight Herb Loaf"]);
        no_phone.phone.clear();
        let mut no_email = request(&["Midnight Herb Loaf"]);
        no_email.email.clear();

        for req in [no_name, no_phone, no_email] {
            let err = build_order(&req, &Catalog::storefront(), &redirects()).unwrap_err();
            assert_eq!(err, CheckoutError::MissingContact);
        }
    }

    #[test]
    fn missing_pickup_window_rejected() {
        let mut req = request(&["Midnight Herb Loaf"]);
        req.pickup_window.clear();
        let err = build_order(&req, &Catalog::storefront(), &redirects()).unwrap_err();
        assert_eq!(err, CheckoutError::MissingPickupWindow);
    }

    #[test]
    fn repeated_items_stay_separate_entries() {
        let req = request(&["Midnight Herb Loaf", "Midnight Herb Loaf"]);
        let order = build_order(&req, &Catalog::storefront(), &redirects()).unwrap();
        assert_eq!(order.line_items.len(), 2);
        assert!(order.line_items.iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn metadata_carries_fulfillment_details() {
        let req = request(&["Midnight Herb Loaf", "Mini Flashlight (black)"]);
        let order = build_order(&req, &Catalog::storefront(), &redirects()).unwrap();

        assert_eq!(order.metadata["buyer_name"], "Jo");
        assert_eq!(order.metadata["buyer_phone"], "555-1234");
        assert_eq!(order.metadata["buyer_email"], "jo@example.com");
        assert_eq!(order.metadata["pickup_window"], "Midnight Batch | 12 AM – 1 AM");
        assert_eq!(
            order.metadata["items"],
            "Midnight Herb Loaf, Mini Flashlight (black)"
        );
        assert_eq!(order.customer_email, "jo@example.com");
    }

    #[test]
    fn nonce_becomes_idempotency_key() {
        let mut req = request(&["Midnight Herb Loaf"]);
        req.nonce = Some("order-nonce-1".into());
        let order = build_order(&req, &Catalog::storefront(), &redirects()).unwrap();
        assert_eq!(order.idempotency_key.as_deref(), Some("order-nonce-1"));
    }

    #[test]
    fn redirect_urls_from_origin() {
        let urls = RedirectUrls::for_origin("https://nightbatchbread.com/");
        assert_eq!(
            urls.success,
            "https://nightbatchbread.com/success.html?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(urls.cancel, "https://nightbatchbread.com/cancel.html");
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::json!({
            "items": [{"name": "Midnight Herb Loaf", "price": 20.0}],
            "pickupWindow": "Midnight Batch | 12 AM – 1 AM",
            "name": "Jo",
            "phone": "555-1234",
            "email": "jo@example.com",
        });

        let req: CheckoutRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.pickup_window, "Midnight Batch | 12 AM – 1 AM");
        assert_eq!(req.items[0].name, "Midnight Herb Loaf");
        assert_eq!(req.nonce, None);
    }

    #[test]
    fn absent_fields_default_rather_than_fail_parsing() {
        let req: CheckoutRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(req.items.is_empty());
        assert!(req.email.is_empty());
    }
}
