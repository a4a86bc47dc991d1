//! Payment Error Types

use shop_core::ShopError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-provider errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error with the HTTP status it came with (0 when the request
    /// never got an answer)
    #[error("Stripe error ({status}): {message}")]
    Stripe { status: u16, message: String },

    /// Identifier rejected before reaching Stripe
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Stripe answered without a checkout URL
    #[error("No checkout URL returned for session {0}")]
    MissingCheckoutUrl(String),
}

impl PaymentError {
    pub(crate) fn from_stripe(err: &stripe::StripeError) -> Self {
        let status = match err {
            stripe::StripeError::Stripe(request) => request.http_status,
            _ => 0,
        };
        PaymentError::Stripe {
            status,
            message: err.to_string(),
        }
    }

    /// Stripe reported the object as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, PaymentError::Stripe { status: 404, .. } | PaymentError::InvalidId(_))
    }

    /// Convert into the storefront error for the product `id`
    pub fn into_shop_error(self, id: &str) -> ShopError {
        if self.is_not_found() {
            return ShopError::ProductNotFound(id.to_string());
        }
        self.into()
    }
}

impl From<PaymentError> for ShopError {
    fn from(err: PaymentError) -> Self {
        ShopError::Upstream(err.to_string())
    }
}
