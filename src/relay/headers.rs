//! Header filtering for the outbound request and response copies.
//!
//! # Responsibilities
//! - Drop reserved edge-platform headers from the outbound request
//! - Name the hop-by-hop headers stripped when copying response headers
//!
//! # Design Decisions
//! - Filtering is a pure, total function over the inbound header multimap
//! - `http::HeaderName` is always lowercase, so prefix matching is already
//!   case-insensitive
//! - Order and multiplicity are preserved via append-based copying

use axum::http::HeaderMap;

/// Prefix used by the hosting edge platform for transport-injected metadata
/// headers. Anything under it never reaches the upstream.
pub const RESERVED_HEADER_PREFIX: &str = "cf-";

/// Hop-by-hop headers that must not be copied onto the outbound response.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Check if a header is hop-by-hop (name must be lowercase, which
/// `HeaderName::as_str` guarantees).
pub fn is_hop_by_hop(header_name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&header_name)
}

/// Derive the outbound request header set from the inbound one.
///
/// Every header whose name starts with [`RESERVED_HEADER_PREFIX`] is dropped;
/// all others pass through unchanged, preserving order and multiplicity.
pub fn filter_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name.as_str().starts_with(RESERVED_HEADER_PREFIX) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}
