//! Stripe Product Catalog
//!
//! Products are always fetched with `default_price` expanded so the price
//! comes back in the same call.

use async_trait::async_trait;
use stripe::{Expandable, ListProducts, Price, Product, ProductId};

use shop_core::{CatalogSource, UpstreamPrice, UpstreamProduct};

use crate::checkout::StripeClient;
use crate::error::{PaymentError, Result};

const EXPAND_DEFAULT_PRICE: &[&str] = &["default_price"];
const EXPAND_LIST_DEFAULT_PRICE: &[&str] = &["data.default_price"];

impl StripeClient {
    /// Retrieve a product with its default price expanded
    pub async fn fetch_product(&self, id: &str) -> Result<Product> {
        let product_id: ProductId = id
            .parse()
            .map_err(|_| PaymentError::InvalidId(id.to_string()))?;

        Product::retrieve(self.inner(), &product_id, EXPAND_DEFAULT_PRICE)
            .await
            .map_err(|e| PaymentError::from_stripe(&e))
    }

    /// List active products with their default prices expanded
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let mut params = ListProducts::new();
        params.active = Some(true);
        params.expand = EXPAND_LIST_DEFAULT_PRICE;

        let list = Product::list(self.inner(), &params)
            .await
            .map_err(|e| PaymentError::from_stripe(&e))?;

        Ok(list.data)
    }
}

/// Map a Stripe product onto the provider-neutral shape. A default price that
/// was not expanded counts as missing.
pub fn upstream_product(product: &Product) -> UpstreamProduct {
    UpstreamProduct {
        id: product.id.to_string(),
        name: product.name.clone().unwrap_or_default(),
        description: product.description.clone(),
        images: product.images.clone().unwrap_or_default(),
        default_price: product
            .default_price
            .as_ref()
            .and_then(Expandable::as_object)
            .map(upstream_price),
    }
}

fn upstream_price(price: &Price) -> UpstreamPrice {
    UpstreamPrice {
        id: price.id.to_string(),
        unit_amount: price.unit_amount,
        currency: price.currency.as_ref().map(ToString::to_string),
    }
}

#[async_trait]
impl CatalogSource for StripeClient {
    async fn retrieve_product(&self, id: &str) -> shop_core::Result<UpstreamProduct> {
        let product = self.fetch_product(id).await.map_err(|e| e.into_shop_error(id))?;
        Ok(upstream_product(&product))
    }

    async fn list_products(&self) -> shop_core::Result<Vec<UpstreamProduct>> {
        let products = self.fetch_products().await?;
        Ok(products.iter().map(upstream_product).collect())
    }

    fn name(&self) -> &str {
        "stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::ProductView;

    fn product_json(default_price: serde_json::Value) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": "prod_ABC",
            "object": "product",
            "name": "Camiseta Beyond the Limits",
            "description": "Algodão orgânico",
            "images": ["https://files.stripe.com/camiseta.png"],
            "default_price": default_price,
        }))
        .unwrap()
    }

    #[test]
    fn test_expanded_price_is_mapped() {
        let product = product_json(serde_json::json!({
            "id": "price_XYZ",
            "object": "price",
            "unit_amount": 19990,
            "currency": "brl",
        }));

        let upstream = upstream_product(&product);
        assert_eq!(upstream.id, "prod_ABC");
        assert_eq!(upstream.images.len(), 1);
        let price = upstream.default_price.clone().unwrap();
        assert_eq!(price.id, "price_XYZ");
        assert_eq!(price.unit_amount, Some(19990));

        let view = ProductView::from_upstream(upstream).unwrap();
        assert_eq!(view.price, "R$ 199,90");
        assert_eq!(view.default_price_id, "price_XYZ");
    }

    #[test]
    fn test_unexpanded_price_counts_as_missing() {
        let product = product_json(serde_json::json!("price_XYZ"));
        assert!(upstream_product(&product).default_price.is_none());
    }
}
