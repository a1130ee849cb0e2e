//! nightbatch HTTP Server
//!
//! Axum server exposing the checkout endpoint for the nightbatch storefront.
//! The invariant that matters lives behind `POST /api/checkout`: client carts
//! are re-priced against the trusted catalog before any session is created.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nightbatch_core::Catalog;
use nightbatch_payments::{PaymentGateway, StripeGateway};

use crate::config::ServerConfig;
use crate::handlers::{cors_layer, router};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("loading configuration")?;

    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .context("STOREFRONT_ORIGIN is not a valid header value")?;

    let catalog = Arc::new(Catalog::storefront());
    tracing::info!(items = catalog.len(), "price catalog loaded");

    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(&config.stripe_secret_key));
    tracing::info!(gateway = gateway.name(), "payment gateway configured");

    let state = AppState {
        catalog,
        gateway,
        redirects: config.redirects.clone(),
    };

    let app = router(state)
        .layer(cors_layer(origin))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        origin = %config.allowed_origin,
        "nightbatch server listening"
    );
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health        - Health check");
    tracing::info!("  POST /api/checkout  - Create checkout session");

    axum::serve(listener, app).await?;

    Ok(())
}
