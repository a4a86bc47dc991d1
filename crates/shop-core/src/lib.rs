//! # shop-core
//!
//! Storefront domain shared by the server and the browser bundle.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   retrieve    ┌──────────────┐  render  ┌──────────────┐
//! │   Payment    │──────────────▶│ CatalogSource│─────────▶│ ProductView  │
//! │   Provider   │               └──────────────┘          └──────┬───────┘
//! │   (Stripe)   │                                                │ buy
//! │              │◀── create session ── /api/checkout ◀── CheckoutAction
//! └──────────────┘                                                │
//!                                         browser ◀── checkoutUrl ┘
//! ```
//!
//! Pricing, payments and inventory all live with the payment provider; this
//! crate only normalizes what it returns and drives the checkout redirect.

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod http;
pub mod money;
pub mod product;

pub use catalog::{CatalogSource, CheckoutSession, CheckoutSessions, MockCatalog};
pub use checkout::{
    Browser, CheckoutAction, CheckoutPhase, CheckoutRequest, CheckoutResponse, CheckoutTransport,
    TriggerOutcome, CHECKOUT_FAILURE_MESSAGE,
};
pub use error::{Result, ShopError};
pub use http::HttpCheckoutClient;
pub use money::{format_brl, CurrencyFormat, PT_BR_BRL};
pub use product::{ProductView, UpstreamPrice, UpstreamProduct};
