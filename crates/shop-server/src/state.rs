//! Application State

use std::sync::Arc;

use shop_core::{CatalogSource, CheckoutSessions};

use crate::cache::PageCache;
use crate::render::Renderer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product source (Stripe or the demo catalog)
    pub catalog: Arc<dyn CatalogSource>,

    /// Checkout session creator
    pub checkout: Arc<dyn CheckoutSessions>,

    /// Stale-while-revalidate product pages
    pub pages: Arc<PageCache>,

    /// Templates, initialized once at startup
    pub renderer: Arc<Renderer>,
}
