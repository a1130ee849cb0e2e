//! Checkout Submit Client
//!
//! Posts the cart to the checkout endpoint and interprets the reply the way
//! the storefront page does: a `url` to redirect the buyer to, or one of
//! three user-facing failure categories.

use serde::Deserialize;
use thiserror::Error;

use nightbatch_core::CheckoutRequest;

/// Why a submission did not yield a redirect URL.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Server answered non-2xx; carries the envelope message when parseable.
    #[error("Checkout error: {0}")]
    Rejected(String),

    /// Server answered 2xx but without a usable `url`.
    #[error("Checkout unavailable.")]
    Unavailable,

    /// Transport-level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Default, Deserialize)]
struct CheckoutReply {
    #[serde(default)]
    url: Option<String>,

    #[serde(default)]
    error: Option<ReplyError>,
}

#[derive(Default, Deserialize)]
struct ReplyError {
    #[serde(default)]
    message: String,
}

/// Client for the storefront checkout endpoint.
pub struct CheckoutClient {
    endpoint: String,
    http: reqwest::Client,
}

impl CheckoutClient {
    /// Client for `endpoint`, e.g. `https://nightbatchbread.com/api/checkout`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Submit the cart. On success, the hosted checkout URL to redirect to.
    pub async fn submit(&self, request: &CheckoutRequest) -> Result<String, SubmitError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_reply(status, &body)
    }
}

/// Pure reply interpretation, shared by `submit` and the tests.
fn interpret_reply(status: u16, body: &str) -> Result<String, SubmitError> {
    let reply: CheckoutReply = serde_json::from_str(body).unwrap_or_default();

    if !(200..300).contains(&status) {
        let message = reply
            .error
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("checkout failed with status {status}"));
        return Err(SubmitError::Rejected(message));
    }

    reply
        .url
        .filter(|url| !url.is_empty())
        .ok_or(SubmitError::Unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_reply_yields_url() {
        let url = interpret_reply(200, r#"{"url":"https://checkout.stripe.test/c/pay/cs_1"}"#)
            .unwrap();
        assert_eq!(url, "https://checkout.stripe.test/c/pay/cs_1");
    }

    #[test]
    fn success_without_url_is_unavailable() {
        let err = interpret_reply(200, r"{}").unwrap_err();
        assert!(matches!(err, SubmitError::Unavailable));
    }

    #[test]
    fn rejection_surfaces_envelope_message() {
        let err = interpret_reply(400, r#"{"error":{"message":"Cart is empty."}}"#).unwrap_err();
        match err {
            SubmitError::Rejected(message) => assert_eq!(message, "Cart is empty."),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn rejection_without_envelope_reports_status() {
        let err = interpret_reply(502, "<html>bad gateway</html>").unwrap_err();
        match err {
            SubmitError::Rejected(message) => {
                assert_eq!(message, "checkout failed with status 502");
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
