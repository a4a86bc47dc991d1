//! Mock Catalog
//!
//! In-memory catalog for demos and tests. Serves a handful of static products
//! and hands out fake checkout URLs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{CatalogSource, CheckoutSession, CheckoutSessions};
use crate::error::{Result, ShopError};
use crate::product::UpstreamProduct;

const DEMO_CHECKOUT_BASE: &str = "https://checkout.example/pay";

/// In-memory catalog keyed by product ID
pub struct MockCatalog {
    products: BTreeMap<String, UpstreamProduct>,
    checkout_base: String,
    retrievals: AtomicUsize,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            products: BTreeMap::new(),
            checkout_base: DEMO_CHECKOUT_BASE.into(),
            retrievals: AtomicUsize::new(0),
        }
    }

    /// Catalog with a few demo products
    pub fn demo() -> Self {
        Self::new()
            .with_product(
                UpstreamProduct::new("prod_demo_explorer", "Camiseta Explorer")
                    .with_description("Camiseta de algodão com estampa minimalista.")
                    .with_image("https://placehold.co/520x480/png?text=explorer")
                    .with_price("price_demo_explorer", Some(7990)),
            )
            .with_product(
                UpstreamProduct::new("prod_demo_limits", "Camiseta Beyond the Limits")
                    .with_description("Edição limitada, tecido leve e respirável.")
                    .with_image("https://placehold.co/520x480/png?text=limits")
                    .with_price("price_demo_limits", Some(8990)),
            )
            .with_product(
                UpstreamProduct::new("prod_demo_igniter", "Moletom Igniter")
                    .with_description("Moletom com capuz e bolso canguru.")
                    .with_image("https://placehold.co/520x480/png?text=igniter")
                    .with_price("price_demo_igniter", Some(19990)),
            )
    }

    /// Add or replace a product
    pub fn with_product(mut self, product: UpstreamProduct) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    /// Base URL used for generated checkout URLs
    pub fn with_checkout_base(mut self, base: impl Into<String>) -> Self {
        self.checkout_base = base.into();
        self
    }

    /// Number of `retrieve_product` calls served so far
    pub fn retrievals(&self) -> usize {
        self.retrievals.load(Ordering::SeqCst)
    }

    fn knows_price(&self, price_id: &str) -> bool {
        self.products
            .values()
            .filter_map(|p| p.default_price.as_ref())
            .any(|price| price.id == price_id)
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn retrieve_product(&self, id: &str) -> Result<UpstreamProduct> {
        self.retrievals.fetch_add(1, Ordering::SeqCst);
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| ShopError::ProductNotFound(id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<UpstreamProduct>> {
        Ok(self.products.values().cloned().collect())
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[async_trait]
impl CheckoutSessions for MockCatalog {
    async fn create_checkout_session(&self, price_id: &str) -> Result<CheckoutSession> {
        if !self.knows_price(price_id) {
            return Err(ShopError::Upstream(format!("No such price: '{price_id}'")));
        }

        let id = format!("cs_test_{}", uuid::Uuid::new_v4().simple());
        Ok(CheckoutSession {
            checkout_url: format!("{}/{}", self.checkout_base, id),
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retrieve_known_product() {
        let catalog = MockCatalog::demo();
        let product = catalog.retrieve_product("prod_demo_igniter").await.unwrap();
        assert_eq!(product.name, "Moletom Igniter");
        assert_eq!(product.default_price.unwrap().unit_amount, Some(19990));
        assert_eq!(catalog.retrievals(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let catalog = MockCatalog::demo();
        let err = catalog.retrieve_product("prod_nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_checkout_session_for_known_price() {
        let catalog = MockCatalog::demo().with_checkout_base("https://pay.example");
        let session = catalog
            .create_checkout_session("price_demo_limits")
            .await
            .unwrap();
        assert!(session.id.starts_with("cs_test_"));
        assert_eq!(session.checkout_url, format!("https://pay.example/{}", session.id));
    }

    #[tokio::test]
    async fn test_checkout_session_for_unknown_price() {
        let catalog = MockCatalog::demo();
        assert!(catalog.create_checkout_session("price_nope").await.is_err());
    }
}
