//! Router

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::assets;
use crate::handlers::{
    catalog_page, create_checkout, health_check, product_data, product_page, success_page,
};
use crate::state::AppState;

/// Build the storefront router. `static_dir` holds the WASM bundle served under `/pkg`.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))

        // Pages
        .route("/", get(catalog_page))
        .route("/product/{id}", get(product_page))
        .route("/success", get(success_page))

        // API
        .route("/api/products/{id}", get(product_data))
        .route("/api/checkout", post(create_checkout))

        // Layout assets and the WASM bundle
        .route(assets::STYLESHEET_PATH, get(assets::global_css))
        .route(assets::LOGO_PATH, get(assets::logo_svg))
        .nest_service("/pkg", ServeDir::new(static_dir))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
