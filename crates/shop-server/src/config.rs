//! Server Configuration
//!
//! Read from the environment (after `.env` is loaded by `dotenvy`).

use std::time::Duration;

/// Default page revalidation interval: one hour
pub const DEFAULT_REVALIDATE_SECS: u64 = 60 * 60;

/// Default delay before retrying a page whose generation failed upstream
pub const DEFAULT_FAILURE_RETRY_SECS: u64 = 30;

/// Default cap on remembered not-found/failed products
pub const DEFAULT_CACHE_MAX_MISSES: usize = 1024;

/// Default cap on product pages generated at the same time
pub const DEFAULT_CACHE_MAX_GENERATIONS: usize = 16;

/// Storefront server configuration
#[derive(Clone, Debug)]
pub struct ShopConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Public origin, used for Stripe redirect URLs
    pub site_url: String,

    /// Shown in page titles
    pub site_name: String,

    /// Maximum age of a generated product page before background regeneration
    pub revalidate: Duration,

    /// How long an upstream failure is remembered before trying again
    pub failure_retry: Duration,

    /// Page cache size limits
    pub cache_max_misses: usize,
    pub cache_max_generations: usize,

    /// Directory holding the WASM bundle (`/pkg`)
    pub static_dir: String,

    /// Stripe secret key (None = demo catalog)
    pub stripe_secret_key: Option<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            site_url: "http://localhost:3000".into(),
            site_name: "Ignite Shop".into(),
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            failure_retry: Duration::from_secs(DEFAULT_FAILURE_RETRY_SECS),
            cache_max_misses: DEFAULT_CACHE_MAX_MISSES,
            cache_max_generations: DEFAULT_CACHE_MAX_GENERATIONS,
            static_dir: "static".into(),
            stripe_secret_key: None,
        }
    }
}

impl ShopConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.parse().ok())
                .map_or(default, Duration::from_secs)
        };
        let limit = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(default)
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            site_url: lookup("SITE_URL").unwrap_or(defaults.site_url),
            site_name: lookup("SITE_NAME").unwrap_or(defaults.site_name),
            revalidate: secs("REVALIDATE_SECS", defaults.revalidate),
            failure_retry: secs("FAILURE_RETRY_SECS", defaults.failure_retry),
            cache_max_misses: limit("CACHE_MAX_MISSES", defaults.cache_max_misses),
            cache_max_generations: limit("CACHE_MAX_GENERATIONS", defaults.cache_max_generations),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            stripe_secret_key: lookup("STRIPE_SECRET_KEY").filter(|k| !k.trim().is_empty()),
        }
    }
}
