//! Request translation and response rewriting pipeline.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → target.rs   (resolve encoded path into target URL)
//!     → headers.rs  (drop reserved edge-platform headers)
//!     → upstream.rs (one outbound fetch, redirects not followed)
//!     → classify.rs (redirect / HTML / passthrough branch)
//!     → policy.rs   (no-store + CORS headers)
//! any error → error.rs (uniform 500 JSON envelope)
//! ```
//!
//! # Design Decisions
//! - Every stage is a pure transform except the upstream fetch
//! - Errors propagate with `?` and are converted exactly once, at the
//!   handler boundary
//! - Redirect classification wins over HTML: a redirect carrying an HTML
//!   body is still a redirect

pub mod classify;
pub mod error;
pub mod headers;
pub mod policy;
pub mod rewrite;
pub mod target;
pub mod upstream;

pub use classify::{classify, RelayBody, RelayedResponse};
pub use error::RelayError;
pub use upstream::UpstreamClient;

use axum::http::{header, HeaderMap};

/// Scheme and host of the inbound request, as seen by the caller.
///
/// Both feed the rewrite rules: the scheme is the fallback when the encoded
/// target carries none, and scheme+host anchor rewritten HTML references back
/// at this relay.
#[derive(Debug, Clone)]
pub struct InboundContext {
    pub scheme: String,
    pub host: String,
}

impl InboundContext {
    /// Derive the caller-visible scheme and host from the inbound headers.
    ///
    /// Behind an edge that terminates TLS the scheme arrives in
    /// `x-forwarded-proto`; a bare deployment serves plain HTTP.
    pub fn from_headers(headers: &HeaderMap, fallback_host: &str) -> Self {
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http")
            .to_string();
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(fallback_host)
            .to_string();
        Self { scheme, host }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn scheme_defaults_to_http() {
        let headers = HeaderMap::new();
        let ctx = InboundContext::from_headers(&headers, "relay.local:8080");
        assert_eq!(ctx.scheme, "http");
        assert_eq!(ctx.host, "relay.local:8080");
    }

    #[test]
    fn forwarded_proto_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert(header::HOST, HeaderValue::from_static("relay.example"));
        let ctx = InboundContext::from_headers(&headers, "unused");
        assert_eq!(ctx.scheme, "https");
        assert_eq!(ctx.host, "relay.example");
    }
}
