//! Payment Gateway Seam
//!
//! Abstraction over the external payment provider, so checkout logic can be
//! exercised against a recording mock.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nightbatch_core::SessionOrder;

use crate::error::{PaymentError, Result};

/// URL every successful `MockGateway` call returns.
pub const MOCK_CHECKOUT_URL: &str = "https://checkout.stripe.test/c/pay/cs_test_mock";

/// A provider-hosted payment flow, ready for browser redirect.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostedSession {
    /// Provider session id.
    pub id: String,

    /// Hosted checkout URL to redirect the buyer to.
    pub url: String,
}

/// Payment provider client.
///
/// One implementation per provider; `MockGateway` for tests. A call that
/// returns `Ok` has created a real, billable session on the provider side.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint a hosted checkout session for `order`.
    ///
    /// Single attempt, no retry: a retried creation risks duplicate sessions
    /// unless the order carries an idempotency key.
    async fn create_session(&self, order: &SessionOrder) -> Result<HostedSession>;

    /// Provider name, for health reporting and logs.
    fn name(&self) -> &str;
}

/// Recording gateway for tests and demos.
///
/// Captures every order it is asked to fulfill, then returns a canned URL or
/// the configured failure.
#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<SessionOrder>>,
    fail_with: Option<String>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Orders received so far, in call order.
    pub fn orders(&self) -> Vec<SessionOrder> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_session(&self, order: &SessionOrder) -> Result<HostedSession> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(order.clone());

        if let Some(ref message) = self.fail_with {
            return Err(PaymentError::Stripe(message.clone()));
        }

        Ok(HostedSession {
            id: format!("cs_test_mock_{}", self.call_count()),
            url: MOCK_CHECKOUT_URL.into(),
        })
    }

    fn name(&self) -> &str {
        "MockGateway"
    }
}
