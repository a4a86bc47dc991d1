//! Product Page Cache
//!
//! Stale-while-revalidate store of product projections.
//!
//! - An unknown product answers `Pending` right away (the fallback page) and
//!   generation runs in the background.
//! - A generated page is served until it is older than `revalidate`; the first
//!   request after that still gets the old page and kicks off one background
//!   regeneration.
//! - At most one generation per product is in flight, and at most
//!   `max_generations` overall.
//! - Not-found and failed lookups are kept in a bounded store and dropped once
//!   they expire.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use shop_core::{CatalogSource, ProductView, Result};

use crate::config::ShopConfig;

/// Timing and size rules for the cache
#[derive(Clone, Copy, Debug)]
pub struct CachePolicy {
    /// Maximum age of a page before it is regenerated in the background
    pub revalidate: Duration,

    /// How long an upstream failure is served before trying again
    pub failure_retry: Duration,

    /// Upper bound on remembered not-found/failed products
    pub max_misses: usize,

    /// Upper bound on generations running at the same time
    pub max_generations: usize,
}

impl From<&ShopConfig> for CachePolicy {
    fn from(config: &ShopConfig) -> Self {
        Self {
            revalidate: config.revalidate,
            failure_retry: config.failure_retry,
            max_misses: config.cache_max_misses,
            max_generations: config.cache_max_generations,
        }
    }
}

/// What the page route should render for a product
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState {
    /// Generated page (possibly stale while a regeneration runs)
    Ready(Arc<ProductView>),

    /// Not generated yet; show the loading view
    Pending,

    /// Product does not exist or has no price
    NotFound,

    /// Last generation failed upstream
    Unavailable(String),
}

/// Entry counts reported by `/health`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub pages: usize,
    pub misses: usize,
    pub generating: usize,
}

#[derive(Clone, Debug)]
struct Page {
    view: Arc<ProductView>,
    generated_at: Instant,
}

#[derive(Clone, Debug)]
enum MissKind {
    NotFound,
    Failed(String),
}

#[derive(Debug)]
struct Miss {
    kind: MissKind,
    expires_at: Instant,
}

/// Bounded store of negative results
#[derive(Debug)]
struct MissCache {
    max_entries: usize,
    entries: HashMap<String, Miss>,
}

impl MissCache {
    fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: HashMap::new(),
        }
    }

    fn get(&mut self, id: &str) -> Option<MissKind> {
        self.purge_expired();
        self.entries.get(id).map(|miss| miss.kind.clone())
    }

    fn insert(&mut self, id: &str, kind: MissKind, ttl: Duration) {
        self.purge_expired();
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(id) {
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, miss)| miss.expires_at)
                .map(|(key, _)| key.clone())
            {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(
            id.to_string(),
            Miss {
                kind,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    fn remove(&mut self, id: &str) {
        self.entries.remove(id);
    }

    fn purge_expired(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, miss| miss.expires_at > now);
    }
}

struct Store {
    pages: HashMap<String, Page>,
    misses: MissCache,
}

/// Product page cache backed by a catalog source
pub struct PageCache {
    source: Arc<dyn CatalogSource>,
    policy: CachePolicy,
    store: RwLock<Store>,
    inflight: Mutex<HashSet<String>>,
}

impl PageCache {
    pub fn new(source: Arc<dyn CatalogSource>, policy: CachePolicy) -> Self {
        Self {
            source,
            policy,
            store: RwLock::new(Store {
                pages: HashMap::new(),
                misses: MissCache::new(policy.max_misses),
            }),
            inflight: Mutex::new(HashSet::new()),
        }
    }

    /// Resolve the page state for `id` without waiting on the upstream.
    pub async fn lookup(self: &Arc<Self>, id: &str) -> PageState {
        let page = self.store.read().await.pages.get(id).cloned();

        if let Some(Page { view, generated_at }) = page {
            if generated_at.elapsed() >= self.policy.revalidate {
                tracing::debug!(product_id = id, "page is stale, revalidating in background");
                self.spawn_generation(id).await;
            }
            return PageState::Ready(view);
        }

        let miss = self.store.write().await.misses.get(id);
        match miss {
            Some(MissKind::NotFound) => PageState::NotFound,
            Some(MissKind::Failed(message)) => PageState::Unavailable(message),
            None => {
                self.spawn_generation(id).await;
                PageState::Pending
            }
        }
    }

    /// Fetch, normalize and store the page for `id`.
    ///
    /// Not-found results are remembered for one revalidation interval. Other
    /// failures keep an existing page (retried after another interval) or are
    /// remembered for `failure_retry` when there is nothing to fall back on.
    pub async fn generate(&self, id: &str) -> Result<Arc<ProductView>> {
        let result = match self.source.retrieve_product(id).await {
            Ok(product) => ProductView::from_upstream(product),
            Err(e) => Err(e),
        };

        let mut store = self.store.write().await;
        let now = Instant::now();

        match result {
            Ok(view) => {
                let view = Arc::new(view);
                tracing::info!(product_id = id, price = %view.price, "generated product page");
                store.misses.remove(id);
                store.pages.insert(
                    id.to_string(),
                    Page {
                        view: Arc::clone(&view),
                        generated_at: now,
                    },
                );
                Ok(view)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(product_id = id, error = %e, "product page not found");
                store.pages.remove(id);
                store.misses.insert(id, MissKind::NotFound, self.policy.revalidate);
                Err(e)
            }
            Err(e) => {
                if let Some(page) = store.pages.get_mut(id) {
                    tracing::warn!(product_id = id, error = %e, "revalidation failed, keeping stale page");
                    page.generated_at = now;
                } else {
                    tracing::error!(product_id = id, error = %e, "product page generation failed");
                    let kind = MissKind::Failed(e.user_message().to_string());
                    store.misses.insert(id, kind, self.policy.failure_retry);
                }
                Err(e)
            }
        }
    }

    /// Whether a generation for `id` is currently running
    pub async fn is_generating(&self, id: &str) -> bool {
        self.inflight.lock().await.contains(id)
    }

    pub async fn stats(&self) -> CacheStats {
        let generating = self.inflight.lock().await.len();
        let store = self.store.read().await;
        CacheStats {
            pages: store.pages.len(),
            misses: store.misses.entries.len(),
            generating,
        }
    }

    async fn spawn_generation(self: &Arc<Self>, id: &str) {
        {
            let mut inflight = self.inflight.lock().await;
            if inflight.contains(id) {
                return;
            }
            if inflight.len() >= self.policy.max_generations {
                tracing::debug!(product_id = id, running = inflight.len(), "generation limit reached, deferring");
                return;
            }
            inflight.insert(id.to_string());
        }

        let cache = Arc::clone(self);
        let id = id.to_string();
        tokio::spawn(async move {
            // failures are logged and recorded by `generate`
            let _ = cache.generate(&id).await;
            cache.inflight.lock().await.remove(&id);
        });
    }
}
