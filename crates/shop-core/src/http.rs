//! HTTP Checkout Client
//!
//! `CheckoutTransport` over `reqwest`. Works natively and in the browser.

use async_trait::async_trait;

use crate::checkout::{CheckoutRequest, CheckoutResponse, CheckoutTransport};
use crate::error::{Result, ShopError};

/// Path of the checkout-session endpoint
pub const CHECKOUT_PATH: &str = "/api/checkout";

/// Posts checkout requests to the storefront server
#[derive(Clone, Debug)]
pub struct HttpCheckoutClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCheckoutClient {
    /// `origin` is the storefront origin, e.g. `https://shop.example`
    pub fn new(origin: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", origin.trim_end_matches('/'), CHECKOUT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl CheckoutTransport for HttpCheckoutClient {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopError::CheckoutRejected(status.as_u16()));
        }

        Ok(response.json::<CheckoutResponse>().await?)
    }
}
