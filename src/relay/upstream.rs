//! Outbound request execution.
//!
//! # Responsibilities
//! - Issue exactly one upstream request per inbound request
//! - Stream the inbound body out without buffering
//! - Surface every transport failure as `UpstreamUnreachable`, unretried
//!
//! # Design Decisions
//! - Redirect following is disabled: 3xx responses must reach the classifier
//!   intact so their `Location` can be rewritten
//! - `host` and `content-length` are transport-owned; the client recomputes
//!   them for the target, so forwarded copies are stripped here rather than
//!   in the pure header filter

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::schema::UpstreamConfig;
use crate::relay::error::RelayError;

/// HTTP client for upstream fetches.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Build the shared upstream client.
    pub fn new(config: &UpstreamConfig) -> Self {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .build()
            .expect("client options are static and valid");
        Self { client }
    }

    /// Send one outbound request and return the raw upstream response.
    pub async fn send(
        &self,
        method: Method,
        target: Url,
        mut headers: HeaderMap,
        body: Body,
    ) -> Result<reqwest::Response, RelayError> {
        headers.remove(header::HOST);
        headers.remove(header::CONTENT_LENGTH);
        // The classifier rewrites HTML as text; a compressed upstream body
        // would defeat that, so negotiate identity encoding only.
        headers.remove(header::ACCEPT_ENCODING);

        let request = self.client.request(method.clone(), target).headers(headers);

        // GET/HEAD carry no body; everything else streams the inbound body
        // through without buffering.
        let request = if matches!(method, Method::GET | Method::HEAD) {
            request
        } else {
            request.body(reqwest::Body::wrap_stream(body.into_data_stream()))
        };

        request
            .send()
            .await
            .map_err(|e| RelayError::UpstreamUnreachable(e.to_string()))
    }
}
