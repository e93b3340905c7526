//! Static landing page served for the root path.
//!
//! The page is a fixed asset with no logic; it never enters the relay
//! pipeline.

use axum::response::Html;

const LANDING_PAGE: &str = include_str!("../../assets/landing.html");

/// Serve the landing page for `/`, any method.
pub async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
