//! Product Model
//!
//! `UpstreamProduct` is what the payment provider hands back (product with its
//! default price expanded). `ProductView` is the display projection that the
//! page renderer and the checkout button consume.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::money::format_brl;

/// Price record as returned by the payment provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamPrice {
    /// Opaque price identifier (e.g. `price_XYZ`)
    pub id: String,

    /// Amount in minor units
    #[serde(default)]
    pub unit_amount: Option<i64>,

    /// ISO currency code, lowercase
    #[serde(default)]
    pub currency: Option<String>,
}

/// Product record with its default price expanded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamProduct {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub default_price: Option<UpstreamPrice>,
}

impl UpstreamProduct {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            images: Vec::new(),
            default_price: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn with_price(mut self, price_id: impl Into<String>, unit_amount: Option<i64>) -> Self {
        self.default_price = Some(UpstreamPrice {
            id: price_id.into(),
            unit_amount,
            currency: Some("brl".into()),
        });
        self
    }
}

/// Display-ready product, immutable once rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// Formatted price, e.g. `R$ 199,90`
    pub price: String,
    pub description: String,
    pub default_price_id: String,
}

impl ProductView {
    /// Normalize an upstream product into its display projection.
    ///
    /// Fails with [`ShopError::MissingPrice`] when the product has no default
    /// price, since the purchase control cannot work without one.
    pub fn from_upstream(product: UpstreamProduct) -> Result<Self> {
        let price = product
            .default_price
            .ok_or_else(|| ShopError::MissingPrice(product.id.clone()))?;

        Ok(Self {
            title: product.name,
            image_url: product.images.into_iter().next().unwrap_or_default(),
            price: format_brl(price.unit_amount),
            description: product.description.unwrap_or_default(),
            default_price_id: price.id,
            id: product.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_formats_price() {
        let upstream = UpstreamProduct::new("prod_ABC", "Camiseta Beyond the Limits")
            .with_description("Algodão orgânico")
            .with_image("https://files.example/camiseta.png")
            .with_price("price_XYZ", Some(19990));

        let view = ProductView::from_upstream(upstream).unwrap();
        assert_eq!(view.id, "prod_ABC");
        assert_eq!(view.title, "Camiseta Beyond the Limits");
        assert_eq!(view.price, "R$ 199,90");
        assert_eq!(view.image_url, "https://files.example/camiseta.png");
        assert_eq!(view.description, "Algodão orgânico");
        assert_eq!(view.default_price_id, "price_XYZ");
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let upstream = UpstreamProduct::new("prod_ABC", "Brinde").with_price("price_0", None);
        let view = ProductView::from_upstream(upstream).unwrap();
        assert_eq!(view.price, "R$ 0,00");
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let upstream = UpstreamProduct::new("prod_ABC", "Sem preço");
        let err = ProductView::from_upstream(upstream).unwrap_err();
        assert!(matches!(err, ShopError::MissingPrice(id) if id == "prod_ABC"));
    }

    #[test]
    fn test_optional_fields_become_empty() {
        let upstream = UpstreamProduct::new("prod_1", "Caneca").with_price("price_1", Some(2500));
        let view = ProductView::from_upstream(upstream).unwrap();
        assert_eq!(view.description, "");
        assert_eq!(view.image_url, "");
    }

    #[test]
    fn test_serializes_camel_case() {
        let upstream = UpstreamProduct::new("prod_1", "Caneca").with_price("price_1", Some(2500));
        let view = ProductView::from_upstream(upstream).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["defaultPriceId"], "price_1");
        assert_eq!(json["imageUrl"], "");
        assert_eq!(json["price"], "R$ 25,00");
    }
}
