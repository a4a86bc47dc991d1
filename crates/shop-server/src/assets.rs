//! Layout Assets
//!
//! Global stylesheet and logo shared by every page, embedded in the binary.

use axum::http::header;
use axum::response::IntoResponse;

pub const STYLESHEET_PATH: &str = "/assets/global.css";
pub const LOGO_PATH: &str = "/assets/logo.svg";

const GLOBAL_CSS: &str = include_str!("../assets/global.css");
const LOGO_SVG: &str = include_str!("../assets/logo.svg");

const CACHE_IMMUTABLE: &str = "public, max-age=86400";

pub async fn global_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_IMMUTABLE),
        ],
        GLOBAL_CSS,
    )
}

pub async fn logo_svg() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, CACHE_IMMUTABLE),
        ],
        LOGO_SVG,
    )
}
