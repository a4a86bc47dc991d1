//! Payment Provider Seams
//!
//! The storefront only talks to the payment provider through these traits,
//! so Stripe, the demo catalog and test doubles are interchangeable.

mod mock;

pub use mock::MockCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::product::UpstreamProduct;

/// Product catalog source (Strategy pattern)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Retrieve one product with its default price expanded
    async fn retrieve_product(&self, id: &str) -> Result<UpstreamProduct>;

    /// List active products with their default prices expanded
    async fn list_products(&self) -> Result<Vec<UpstreamProduct>>;

    /// Source name, for health reporting and logs
    fn name(&self) -> &str;
}

/// Hosted checkout session created by the payment provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session ID
    pub id: String,

    /// URL to redirect the buyer to
    pub checkout_url: String,
}

/// Creates hosted checkout sessions for a single price
#[async_trait]
pub trait CheckoutSessions: Send + Sync {
    async fn create_checkout_session(&self, price_id: &str) -> Result<CheckoutSession>;
}
