//! Stripe Checkout Integration
//!
//! Hosted-checkout ("payment" mode) session creation via the Stripe API.

use std::collections::HashMap;

use async_trait::async_trait;
use stripe::{
    CheckoutSession, CheckoutSessionMode, Client, CreateCheckoutSession,
    CreateCheckoutSessionLineItems, CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData, CreateCheckoutSessionPaymentMethodTypes,
    Currency, RequestStrategy,
};

use nightbatch_core::{LineItem, SessionOrder};

use crate::error::{PaymentError, Result};
use crate::gateway::{HostedSession, PaymentGateway};

/// Stripe client wrapper.
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    /// Create from a secret API key.
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create from `STRIPE_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        Ok(Self::new(&secret_key))
    }
}

/// Convert catalog-priced line items to Stripe `price_data` entries.
fn to_stripe_line_items(items: &[LineItem]) -> Vec<CreateCheckoutSessionLineItems> {
    items
        .iter()
        .map(|item| CreateCheckoutSessionLineItems {
            quantity: Some(u64::from(item.quantity)),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: Currency::USD,
                unit_amount: Some(item.unit_amount_cents),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: item.name.clone(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_session(&self, order: &SessionOrder) -> Result<HostedSession> {
        let line_items = to_stripe_line_items(&order.line_items);
        let metadata = order
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<HashMap<_, _>>();

        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
        params.line_items = Some(line_items);
        params.customer_email = Some(&order.customer_email);
        params.success_url = Some(&order.success_url);
        params.cancel_url = Some(&order.cancel_url);
        params.metadata = Some(metadata);

        // A retried submission with the same nonce must not mint a second
        // billable session.
        let client = match order.idempotency_key {
            Some(ref key) => self
                .client
                .clone()
                .with_strategy(RequestStrategy::Idempotent(key.clone())),
            None => self.client.clone(),
        };

        let session = CheckoutSession::create(&client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(session_id = %session.id, "created Stripe checkout session");

        Ok(HostedSession {
            id: session.id.to_string(),
            url,
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_items_map_to_price_data() {
        let items = vec![
            LineItem {
                name: "Midnight Herb Loaf".into(),
                unit_amount_cents: 2000,
                quantity: 1,
            },
            LineItem {
                name: "Mini Flashlight (black)".into(),
                unit_amount_cents: 600,
                quantity: 1,
            },
        ];

        let stripe_items = to_stripe_line_items(&items);
        assert_eq!(stripe_items.len(), 2);

        let first = &stripe_items[0];
        assert_eq!(first.quantity, Some(1));
        let price_data = first.price_data.as_ref().unwrap();
        assert_eq!(price_data.currency, Currency::USD);
        assert_eq!(price_data.unit_amount, Some(2000));
        assert_eq!(
            price_data.product_data.as_ref().unwrap().name,
            "Midnight Herb Loaf"
        );
    }
}
