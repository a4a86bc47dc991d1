//! Error Types

use thiserror::Error;

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, ShopError>;

/// Storefront error types
#[derive(Error, Debug)]
pub enum ShopError {
    /// Product does not exist upstream
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but has no default price attached
    #[error("Product {0} has no default price")]
    MissingPrice(String),

    /// Payment provider returned an error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Checkout endpoint answered with a non-success status
    #[error("Checkout rejected with status {0}")]
    CheckoutRejected(u16),

    /// Transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShopError {
    /// Whether the product page should render as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShopError::ProductNotFound(_) | ShopError::MissingPrice(_))
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> &'static str {
        match self {
            ShopError::ProductNotFound(_) | ShopError::MissingPrice(_) => "Produto não encontrado.",
            ShopError::Upstream(_) | ShopError::Network(_) => {
                "Não foi possível falar com o provedor de pagamentos. Tente novamente."
            }
            ShopError::CheckoutRejected(_) => "Falha ao redirecionar para o pagamento",
            _ => "Ocorreu um erro inesperado.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(ShopError::ProductNotFound("prod_1".into()).is_not_found());
        assert!(ShopError::MissingPrice("prod_1".into()).is_not_found());
        assert!(!ShopError::Upstream("boom".into()).is_not_found());
        assert!(!ShopError::CheckoutRejected(500).is_not_found());
    }
}
