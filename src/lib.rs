//! Stateless HTTP Forwarding Relay
//!
//! Accepts an inbound request whose path encodes a target URL, forwards an
//! equivalent request upstream, and returns the upstream response after a
//! small set of rewrites.
//!
//! # Architecture Overview
//!
//! ```text
//! inbound request
//!     → relay::target    (resolve encoded path into a target URL)
//!     → relay::headers   (drop reserved edge-platform headers)
//!     → relay::upstream  (one outbound fetch, redirects not followed)
//!     → relay::classify  (redirect / HTML / passthrough branch)
//!     → relay::policy    (no-store + CORS headers)
//!     → outbound response
//!
//! any pipeline error
//!     → relay::error     (uniform 500 JSON envelope)
//! ```
//!
//! The relay holds no state across requests; every request is an independent
//! execution with exactly one suspension point (the upstream fetch).

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use relay::error::RelayError;
