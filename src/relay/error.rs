//! Pipeline error taxonomy and the uniform JSON error envelope.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors raised anywhere in the relay pipeline.
///
/// None of these are retried or recovered internally. Each is caught exactly
/// once at the handler boundary and converted into the JSON envelope; callers
/// never see a half-rewritten body or partial header set.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The resolved target string is not a syntactically valid URL.
    #[error("invalid target URL: {0}")]
    InvalidTargetUrl(String),

    /// Network, DNS, TLS or timeout failure talking to the upstream.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The upstream redirect carried a `Location` that could not be parsed.
    #[error("redirect rewrite failed: {0}")]
    RedirectRewrite(String),

    /// An HTML body could not be decoded as text.
    #[error("body decode failed: {0}")]
    BodyDecode(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(
                header::CONTENT_TYPE,
                "application/json; charset=utf-8",
            )],
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
