//! Response classification and post-processing.
//!
//! # Responsibilities
//! - Branch on response class: redirect, HTML, or passthrough
//! - Rewrite redirect `Location` headers into the relay's own form
//! - Buffer and rewrite HTML bodies; stream everything else
//!
//! # Design Decisions
//! - Precedence is fixed: redirect first, then HTML, then passthrough. A
//!   redirect that also carries an HTML body is still a redirect.
//! - Only the HTML branch buffers; large non-HTML payloads flow through in
//!   constant memory.
//! - Upstream headers are reused as-is (duplicates such as multiple
//!   `Set-Cookie` included); a redirect replaces only `Location`.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use url::Url;

use crate::relay::error::RelayError;
use crate::relay::headers::is_hop_by_hop;
use crate::relay::rewrite::{rewrite_html, rewrite_location};
use crate::relay::InboundContext;

/// Statuses treated as redirects, in classifier precedence.
const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// Body of a relayed response.
///
/// HTML is buffered so the textual rewrite can run; everything else stays a
/// stream.
pub enum RelayBody {
    Stream(BoxStream<'static, Result<Bytes, reqwest::Error>>),
    Text(String),
}

/// An upstream response after classification and rewriting, ready for policy
/// injection and conversion to the outbound response.
pub struct RelayedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: RelayBody,
}

/// Classify the upstream response into exactly one branch and apply its
/// rewrite.
pub async fn classify(
    response: reqwest::Response,
    inbound: &InboundContext,
    target: &Url,
) -> Result<RelayedResponse, RelayError> {
    let status = response.status();
    let mut headers = response.headers().clone();

    if REDIRECT_STATUSES.contains(&status.as_u16()) {
        let rewritten = match headers.get(header::LOCATION) {
            Some(value) => {
                let location = value
                    .to_str()
                    .map_err(|e| RelayError::RedirectRewrite(e.to_string()))?;
                Some(rewrite_location(location, response.url())?)
            }
            // A redirect without a Location passes through unchanged.
            None => None,
        };
        if let Some(rewritten) = rewritten {
            let value = HeaderValue::from_str(&rewritten)
                .map_err(|e| RelayError::RedirectRewrite(e.to_string()))?;
            headers.insert(header::LOCATION, value);
        }
        return Ok(RelayedResponse {
            status,
            headers,
            body: RelayBody::Stream(response.bytes_stream().boxed()),
        });
    }

    if is_html(&headers) {
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::BodyDecode(e.to_string()))?;
        // The rewrite changes the length; let the server recompute it.
        headers.remove(header::CONTENT_LENGTH);
        relabel_charset_utf8(&mut headers);
        return Ok(RelayedResponse {
            status,
            headers,
            body: RelayBody::Text(rewrite_html(&text, inbound, target)),
        });
    }

    Ok(RelayedResponse {
        status,
        headers,
        body: RelayBody::Stream(response.bytes_stream().boxed()),
    })
}

/// The HTML branch decodes per the upstream charset but re-emits the
/// rewritten body as UTF-8; the label must follow the bytes.
fn relabel_charset_utf8(headers: &mut HeaderMap) {
    if let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        let media_type = value.split(';').next().unwrap_or(value).trim().to_string();
        if let Ok(relabeled) = HeaderValue::from_str(&format!("{}; charset=utf-8", media_type)) {
            headers.insert(header::CONTENT_TYPE, relabeled);
        }
    }
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false)
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let body = match self.body {
            RelayBody::Stream(stream) => Body::from_stream(stream),
            RelayBody::Text(text) => Body::from(text),
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        for (name, value) in &self.headers {
            if is_hop_by_hop(name.as_str()) {
                continue;
            }
            response.headers_mut().append(name.clone(), value.clone());
        }
        response
    }
}
