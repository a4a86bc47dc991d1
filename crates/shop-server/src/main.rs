//! Storefront HTTP Server
//!
//! Axum-based server rendering product pages from the payment provider's
//! catalog and creating hosted checkout sessions.

mod app;
mod assets;
mod cache;
mod config;
mod error;
mod handlers;
mod render;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_core::{CatalogSource, CheckoutSessions, MockCatalog};
use shop_payments::StripeClient;

use crate::cache::{CachePolicy, PageCache};
use crate::config::ShopConfig;
use crate::render::Renderer;
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
    let config = ShopConfig::from_env();

    // Payment provider
    let (catalog, checkout): (Arc<dyn CatalogSource>, Arc<dyn CheckoutSessions>) =
        match config.stripe_secret_key.as_deref() {
            Some(secret_key) => {
                tracing::info!("✓ Stripe configured");
                let stripe = Arc::new(StripeClient::new(secret_key, &config.site_url));
                (stripe.clone() as Arc<dyn CatalogSource>, stripe as Arc<dyn CheckoutSessions>)
            }
            None => {
                tracing::warn!("⚠ Stripe not configured - serving the demo catalog");
                tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
                let demo = Arc::new(MockCatalog::demo());
                (demo.clone() as Arc<dyn CatalogSource>, demo as Arc<dyn CheckoutSessions>)
            }
        };

    // Global styles and templates, set up once
    let renderer = Renderer::init(config.site_name.clone())?;

    let pages = PageCache::new(catalog.clone(), CachePolicy::from(&config));

    // Build application state
    let state = AppState {
        catalog,
        checkout,
        pages: Arc::new(pages),
        renderer: Arc::new(renderer),
    };

    let app = app::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 {} running on http://{}", config.site_name, config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                   - Catalog");
    tracing::info!("  GET  /product/{{id}}       - Product page");
    tracing::info!("  GET  /api/products/{{id}}  - Product data");
    tracing::info!("  POST /api/checkout       - Create Stripe checkout");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("Pages revalidate every {}s", config.revalidate.as_secs());
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
