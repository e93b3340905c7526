//! Target URL resolution.
//!
//! # Responsibilities
//! - Percent-decode the inbound path exactly once
//! - Default to the caller's scheme for shorthand targets (`/example.com/a`)
//! - Append the inbound query string verbatim
//!
//! # Design Decisions
//! - An explicit `http://` or `https://` prefix in the decoded path always
//!   wins over the caller's scheme
//! - The root path never reaches this function; it is served the landing page

use url::Url;

use crate::relay::error::RelayError;

/// Resolve the inbound path and query into a fully-qualified target URL.
pub fn resolve_target(
    inbound_scheme: &str,
    path: &str,
    query: Option<&str>,
) -> Result<Url, RelayError> {
    let encoded = path.strip_prefix('/').unwrap_or(path);
    let decoded = urlencoding::decode(encoded)
        .map_err(|e| RelayError::InvalidTargetUrl(format!("{}: {}", encoded, e)))?;

    let mut raw = if decoded.starts_with("http://") || decoded.starts_with("https://") {
        decoded.into_owned()
    } else {
        format!("{}://{}", inbound_scheme, decoded)
    };

    if let Some(query) = query {
        raw.push('?');
        raw.push_str(query);
    }

    Url::parse(&raw).map_err(|e| RelayError::InvalidTargetUrl(format!("{}: {}", raw, e)))
}
