//! UI Components

use std::rc::Rc;

use leptos::prelude::*;
use shop_core::{CheckoutAction, HttpCheckoutClient, TriggerOutcome};

use crate::api::{self, WindowBrowser};

type PageCheckout = CheckoutAction<HttpCheckoutClient, WindowBrowser>;

/// "Comprar agora" button, disabled while a checkout request is in flight
#[component]
pub fn BuyButton(price_id: String) -> impl IntoView {
    let action: StoredValue<Rc<PageCheckout>, LocalStorage> = StoredValue::new_local(Rc::new(
        CheckoutAction::new(price_id, api::checkout_client(), WindowBrowser),
    ));
    let (in_flight, set_in_flight) = signal(false);

    let buy = move |_| {
        let action = action.get_value();
        set_in_flight.set(true);
        leptos::task::spawn_local(async move {
            // stays disabled once the browser is leaving the page; an ignored
            // click leaves the state to the trigger already running
            if action.trigger().await == TriggerOutcome::Failed {
                set_in_flight.set(false);
            }
        });
    };

    view! {
        <button on:click=buy disabled=move || in_flight.get()>
            "Comprar agora"
        </button>
    }
}
