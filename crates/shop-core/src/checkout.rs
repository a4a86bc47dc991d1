//! Checkout Initiator
//!
//! Client-side action behind the "buy" button. One click sends the price ID to
//! the checkout endpoint and, on success, sends the browser to the hosted
//! checkout page.
//!
//! ```text
//!          trigger()              Ok(url)
//!  Idle ─────────────▶ InFlight ─────────▶ NavigatingAway
//!   ▲                     │
//!   └─────── Err ─────────┘   (alert shown once)
//! ```
//!
//! The phase lives in a `Cell`: the action runs on a single-threaded page and
//! the button is disabled while a request is in flight.

use std::cell::Cell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Alert shown when the checkout session could not be created
pub const CHECKOUT_FAILURE_MESSAGE: &str = "Falha ao redirecionar para o pagamento";

/// Body sent to the checkout endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: String,
}

/// Successful checkout endpoint response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

/// Sends one checkout request. Not `Send`: in the browser it runs on the
/// page's event loop.
#[async_trait(?Send)]
pub trait CheckoutTransport {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse>;
}

/// The browsing context the action drives
pub trait Browser {
    /// Leave the page for `url`
    fn navigate(&self, url: &str);

    /// Blocking user-facing notification
    fn alert(&self, message: &str);
}

/// Checkout action phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    InFlight,
    /// Terminal for this page instance
    NavigatingAway,
}

/// What a single `trigger` call did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Browser sent to the checkout URL
    Redirected(String),

    /// Request failed; the action is idle again
    Failed,

    /// Action was not idle; nothing was sent
    Ignored,
}

/// Checkout action for one product page
pub struct CheckoutAction<T, B> {
    price_id: String,
    transport: T,
    browser: B,
    phase: Cell<CheckoutPhase>,
}

impl<T: CheckoutTransport, B: Browser> CheckoutAction<T, B> {
    pub fn new(price_id: impl Into<String>, transport: T, browser: B) -> Self {
        Self {
            price_id: price_id.into(),
            transport,
            browser,
            phase: Cell::new(CheckoutPhase::Idle),
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase.get()
    }

    /// Whether the purchase control should be disabled
    pub fn is_in_flight(&self) -> bool {
        self.phase.get() == CheckoutPhase::InFlight
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Run the checkout flow once. No automatic retry: after a failure the
    /// user has to trigger again.
    pub async fn trigger(&self) -> TriggerOutcome {
        if self.phase.get() != CheckoutPhase::Idle {
            tracing::debug!(phase = ?self.phase.get(), "checkout already started, ignoring trigger");
            return TriggerOutcome::Ignored;
        }

        self.phase.set(CheckoutPhase::InFlight);
        let request = CheckoutRequest {
            price_id: self.price_id.clone(),
        };

        match self.transport.create_checkout(&request).await {
            Ok(response) => {
                self.phase.set(CheckoutPhase::NavigatingAway);
                self.browser.navigate(&response.checkout_url);
                TriggerOutcome::Redirected(response.checkout_url)
            }
            Err(e) => {
                tracing::warn!(price_id = %self.price_id, error = %e, "checkout session request failed");
                self.phase.set(CheckoutPhase::Idle);
                self.browser.alert(CHECKOUT_FAILURE_MESSAGE);
                TriggerOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShopError;
    use std::cell::RefCell;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingBrowser {
        navigations: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
    }

    impl Browser for RecordingBrowser {
        fn navigate(&self, url: &str) {
            self.navigations.borrow_mut().push(url.to_string());
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    /// Transport that answers with a fixed URL or a network-style failure
    struct StubTransport {
        checkout_url: Option<String>,
        requests: RefCell<Vec<CheckoutRequest>>,
        gate: Option<Notify>,
    }

    impl StubTransport {
        fn succeeding(url: &str) -> Self {
            Self {
                checkout_url: Some(url.to_string()),
                requests: RefCell::new(Vec::new()),
                gate: None,
            }
        }

        fn failing() -> Self {
            Self {
                checkout_url: None,
                requests: RefCell::new(Vec::new()),
                gate: None,
            }
        }

        fn gated(mut self) -> Self {
            self.gate = Some(Notify::new());
            self
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl CheckoutTransport for StubTransport {
        async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse> {
            self.requests.borrow_mut().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.checkout_url {
                Some(url) => Ok(CheckoutResponse {
                    checkout_url: url.clone(),
                }),
                None => Err(ShopError::Upstream("connection refused".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_success_navigates_to_checkout_url() {
        let action = CheckoutAction::new(
            "price_XYZ",
            StubTransport::succeeding("https://pay.example/cs_123"),
            RecordingBrowser::default(),
        );
        assert_eq!(action.phase(), CheckoutPhase::Idle);

        let outcome = action.trigger().await;

        assert_eq!(outcome, TriggerOutcome::Redirected("https://pay.example/cs_123".into()));
        assert_eq!(action.phase(), CheckoutPhase::NavigatingAway);
        assert_eq!(
            action.browser().navigations.borrow().as_slice(),
            ["https://pay.example/cs_123".to_string()]
        );
        assert!(action.browser().alerts.borrow().is_empty());

        let requests = action.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].price_id, "price_XYZ");
    }

    #[tokio::test]
    async fn test_failure_returns_to_idle_with_one_alert() {
        let action = CheckoutAction::new(
            "price_XYZ",
            StubTransport::failing(),
            RecordingBrowser::default(),
        );

        let outcome = action.trigger().await;

        assert_eq!(outcome, TriggerOutcome::Failed);
        assert_eq!(action.phase(), CheckoutPhase::Idle);
        assert!(!action.is_in_flight());
        assert_eq!(
            action.browser().alerts.borrow().as_slice(),
            [CHECKOUT_FAILURE_MESSAGE.to_string()]
        );
        assert!(action.browser().navigations.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure_is_manual() {
        let action = CheckoutAction::new(
            "price_XYZ",
            StubTransport::failing(),
            RecordingBrowser::default(),
        );

        action.trigger().await;
        assert_eq!(action.transport().request_count(), 1);

        action.trigger().await;
        assert_eq!(action.transport().request_count(), 2);
        assert_eq!(action.browser().alerts.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_trigger_while_in_flight_is_ignored() {
        let action = CheckoutAction::new(
            "price_XYZ",
            StubTransport::succeeding("https://pay.example/cs_123").gated(),
            RecordingBrowser::default(),
        );

        let first = action.trigger();
        let second = async {
            while action.phase() != CheckoutPhase::InFlight {
                tokio::task::yield_now().await;
            }
            assert!(action.is_in_flight());
            let outcome = action.trigger().await;
            if let Some(gate) = &action.transport().gate {
                gate.notify_one();
            }
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, TriggerOutcome::Ignored);
        assert_eq!(first, TriggerOutcome::Redirected("https://pay.example/cs_123".into()));
        assert_eq!(action.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_trigger_after_navigation_is_ignored() {
        let action = CheckoutAction::new(
            "price_XYZ",
            StubTransport::succeeding("https://pay.example/cs_123"),
            RecordingBrowser::default(),
        );

        action.trigger().await;
        assert_eq!(action.trigger().await, TriggerOutcome::Ignored);
        assert_eq!(action.transport().request_count(), 1);
    }

    #[test]
    fn test_wire_format() {
        let body = serde_json::to_value(CheckoutRequest {
            price_id: "price_XYZ".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "priceId": "price_XYZ" }));

        let response: CheckoutResponse =
            serde_json::from_str(r#"{"checkoutUrl":"https://pay.example/cs_123"}"#).unwrap();
        assert_eq!(response.checkout_url, "https://pay.example/cs_123");
    }
}
