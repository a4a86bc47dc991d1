//! # shop-payments
//!
//! Stripe adapter for the storefront.
//!
//! ## Stripe Checkout (Hosted)
//!
//! **Flow:** product page → `/api/checkout` → Stripe hosted page → back to
//! the storefront
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  Product    │────▶│  Stripe Hosted  │────▶│  /success   │
//! │  page       │     │  Checkout Page  │     │  or /       │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! Stripe owns pricing, payment collection and PCI scope. The storefront
//! forwards a price ID and nothing else.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_core::{CatalogSource, ProductView};
//! use shop_payments::StripeClient;
//!
//! let stripe = StripeClient::new("sk_test_xxx", "https://shop.example");
//!
//! // Product page data
//! let product = stripe.retrieve_product("prod_ABC").await?;
//! let view = ProductView::from_upstream(product)?;
//!
//! // Checkout for its default price
//! let session = stripe.create_checkout_session(&view.default_price_id).await?;
//! // Redirect buyer to: session.checkout_url
//! ```

mod catalog;
mod checkout;
mod error;

pub use catalog::upstream_product;
pub use checkout::StripeClient;
pub use error::{PaymentError, Result};
