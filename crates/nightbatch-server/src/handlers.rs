//! HTTP Handlers
//!
//! The checkout endpoint and its wire contract: every failure leaves as a
//! `{"error":{"message"}}` envelope, never as an unstructured fault.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use nightbatch_core::{CheckoutError, CheckoutRequest, build_order};
use nightbatch_payments::PaymentError;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateway: String,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Handler-level failure, mapped onto the wire contract.
#[derive(Debug)]
pub enum ApiError {
    /// Client-caused: unparseable body or failed validation (400).
    Validation(String),

    /// Payment provider failure (500).
    Upstream(String),
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::Upstream(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(ErrorEnvelope {
                error: ErrorBody { message },
            }),
        )
            .into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Routes shared by `main` and the tests; `main` layers CORS and tracing on
/// top. The explicit OPTIONS handler keeps bare (non-preflight) OPTIONS at
/// 200, and the method router answers anything else with 405 + `Allow`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/checkout", post(create_checkout).options(preflight))
        .with_state(state)
}

/// CORS policy: the storefront origin only, POST/OPTIONS, Content-Type.
///
/// Advisory metadata for browsers; it does not stop direct API calls.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        gateway: state.gateway.name().to_string(),
    })
}

/// Empty 200 for CORS preflight.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Validate, re-price, and mint a hosted checkout session.
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(request) = payload?;

    let order = build_order(&request, &state.catalog, &state.redirects)?;

    let session = state.gateway.create_session(&order).await.map_err(|e| {
        tracing::error!(error = %e, "checkout session creation failed");
        ApiError::from(e)
    })?;

    tracing::info!(
        session_id = %session.id,
        items = order.line_items.len(),
        "checkout session created"
    );

    Ok(Json(CheckoutResponse { url: session.url }))
}

// ============================================================================
// Tests
// ============================================================================
