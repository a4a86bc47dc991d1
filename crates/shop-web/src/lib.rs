//! Storefront Web Island
//!
//! Server-rendered product pages leave a `#buy` placeholder carrying the
//! product's default price ID. This bundle mounts the purchase control there.

mod api;
mod components;

pub use components::BuyButton;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Element the purchase control is mounted into
const MOUNT_ID: &str = "buy";

/// Attribute holding the default price ID
const PRICE_ATTR: &str = "data-price-id";

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // pages without a purchase control (catalog, messages)
    let Some(root) = mount_point() else {
        return;
    };
    let Some(price_id) = root.get_attribute(PRICE_ATTR).filter(|id| !id.is_empty()) else {
        return;
    };

    root.set_inner_html("");
    leptos::mount::mount_to(root, move || view! { <BuyButton price_id=price_id /> }).forget();
}

fn mount_point() -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(MOUNT_ID)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}
