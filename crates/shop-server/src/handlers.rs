//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use shop_core::{CheckoutRequest, CheckoutResponse, ProductView};

use crate::cache::{CacheStats, PageState};
use crate::error::ServerError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog: String,
    pub cache: CacheStats,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Pages
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        catalog: state.catalog.name().to_string(),
        cache: state.pages.stats().await,
    })
}

/// Catalog listing
pub async fn catalog_page(State(state): State<AppState>) -> Result<Response, ServerError> {
    let products = match state.catalog.list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "catalog listing failed");
            let html = state.renderer.unavailable_page(e.user_message())?;
            return Ok((StatusCode::BAD_GATEWAY, Html(html)).into_response());
        }
    };

    let views: Vec<ProductView> = products
        .into_iter()
        .filter_map(|product| {
            let id = product.id.clone();
            ProductView::from_upstream(product)
                .inspect_err(|e| tracing::debug!(product_id = %id, error = %e, "skipping product"))
                .ok()
        })
        .collect();

    Ok(Html(state.renderer.catalog_page(&views)?).into_response())
}

/// Product detail page, with the loading fallback for pages not generated yet
pub async fn product_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let renderer = &state.renderer;

    let response = match state.pages.lookup(&id).await {
        PageState::Ready(view) => Html(renderer.product_page(&view)?).into_response(),
        PageState::Pending => (
            [(header::CACHE_CONTROL, "no-store")],
            Html(renderer.fallback_page()?),
        )
            .into_response(),
        PageState::NotFound => (StatusCode::NOT_FOUND, Html(renderer.not_found_page()?)).into_response(),
        PageState::Unavailable(message) => (
            StatusCode::BAD_GATEWAY,
            Html(renderer.unavailable_page(&message)?),
        )
            .into_response(),
    };

    Ok(response)
}

/// JSON view of the same page state
pub async fn product_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    match state.pages.lookup(&id).await {
        PageState::Ready(view) => Ok(Json(view.as_ref().clone())),
        PageState::Pending => Err(api_error(StatusCode::ACCEPTED, "Page is being generated", "PENDING")),
        PageState::NotFound => Err(api_error(StatusCode::NOT_FOUND, "Product not found", "NOT_FOUND")),
        PageState::Unavailable(message) => Err(api_error(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")),
    }
}

/// Purchase confirmation page
pub async fn success_page(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    Ok(Html(state.renderer.success_page()?))
}

// ============================================================================
// Checkout
// ============================================================================

/// Create a Stripe checkout session for one unit of a price
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "unreadable checkout request");
        api_error(StatusCode::BAD_REQUEST, "Price not found", "PRICE_NOT_FOUND")
    })?;

    let price_id = payload.price_id.trim();
    if price_id.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Price not found", "PRICE_NOT_FOUND"));
    }

    let session = state
        .checkout
        .create_checkout_session(price_id)
        .await
        .map_err(|e| {
            tracing::error!(price_id, error = %e, "checkout error");
            api_error(StatusCode::BAD_GATEWAY, e.user_message(), "CHECKOUT_ERROR")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            checkout_url: session.checkout_url,
        }),
    ))
}
