//! Stripe Checkout Integration
//!
//! Hosted checkout: the storefront forwards a price ID, Stripe hosts the
//! payment page, and the buyer comes back to `success_url` or `cancel_url`.

use async_trait::async_trait;
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
};

use shop_core::{CheckoutSession, CheckoutSessions};

use crate::error::{PaymentError, Result};

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    success_url: String,
    cancel_url: String,
}

impl StripeClient {
    /// Create a new Stripe client. `site_url` is the public storefront origin
    /// buyers are sent back to.
    pub fn new(secret_key: &str, site_url: &str) -> Self {
        let site_url = site_url.trim_end_matches('/');
        Self {
            client: Client::new(secret_key),
            success_url: format!("{site_url}/success?session_id={{CHECKOUT_SESSION_ID}}"),
            cancel_url: format!("{site_url}/"),
        }
    }

    pub fn success_url(&self) -> &str {
        &self.success_url
    }

    pub fn cancel_url(&self) -> &str {
        &self.cancel_url
    }

    /// Create a one-off payment session for a single unit of `price_id`.
    ///
    /// Returns the session with the URL to redirect the buyer to.
    pub async fn create_checkout_session(&self, price_id: &str) -> Result<CheckoutSession> {
        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(self.success_url.as_str());
        params.cancel_url = Some(self.cancel_url.as_str());
        params.mode = Some(CheckoutSessionMode::Payment);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(price_id.to_string()),
            quantity: Some(1),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::from_stripe(&e))?;

        let id = session.id.to_string();
        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::MissingCheckoutUrl(id.clone()))?;

        tracing::info!(session_id = %id, price_id, "created checkout session");

        Ok(CheckoutSession { id, checkout_url })
    }

    /// Get the underlying Stripe client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl CheckoutSessions for StripeClient {
    async fn create_checkout_session(&self, price_id: &str) -> shop_core::Result<CheckoutSession> {
        Ok(Self::create_checkout_session(self, price_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_urls() {
        let client = StripeClient::new("sk_test_xxx", "https://shop.example/");
        assert_eq!(
            client.success_url(),
            "https://shop.example/success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(client.cancel_url(), "https://shop.example/");
    }
}
