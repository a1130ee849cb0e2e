//! Application State

use std::sync::Arc;

use nightbatch_core::{Catalog, RedirectUrls};
use nightbatch_payments::PaymentGateway;

/// Shared application state.
///
/// Everything here is read-only at request time, so handlers are freely
/// concurrent with no locking.
#[derive(Clone)]
pub struct AppState {
    /// Trusted price catalog, immutable for the process lifetime.
    pub catalog: Arc<Catalog>,

    /// Payment provider client.
    pub gateway: Arc<dyn PaymentGateway>,

    /// Success/cancel redirect targets passed to the provider.
    pub redirects: RedirectUrls,
}
