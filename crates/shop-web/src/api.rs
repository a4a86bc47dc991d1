//! Browser Bindings

use shop_core::{Browser, HttpCheckoutClient};

/// Checkout client for the page's own origin
pub fn checkout_client() -> HttpCheckoutClient {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());

    HttpCheckoutClient::new(&origin)
}

/// The current browser window
pub struct WindowBrowser;

impl Browser for WindowBrowser {
    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
