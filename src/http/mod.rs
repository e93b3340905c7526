//! HTTP surface of the relay.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, relay handler)
//!     → relay pipeline (crate::relay)
//!     → response to client
//! `/` → landing.rs (static page, no pipeline)
//! ```

pub mod landing;
pub mod server;

pub use server::HttpServer;
