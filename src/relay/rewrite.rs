//! Textual rewrites applied to upstream responses.
//!
//! # Responsibilities
//! - Turn a redirect `Location` into the relay's self-referential form
//! - Point root-relative HTML resource references back through the relay
//!
//! # Design Decisions
//! - The HTML rewrite is a string-level pass over raw markup, not a
//!   structural parse. It matches `href=`/`src=`/`action=` followed by a
//!   quote and a single leading `/`. URLs inside inline scripts, styles,
//!   CSS `url()` and `srcset` lists are out of scope.
//! - Protocol-relative references (`//host/...`) must never match; the
//!   pattern requires a non-`/` character after the slash.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

use crate::relay::error::RelayError;
use crate::relay::InboundContext;

/// `href="/x`, `src='/x` or `action="/x` with exactly one leading slash.
static ROOT_RELATIVE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"((?:href|src|action)=["'])/([^/])"#).expect("pattern is valid"));

/// Rewrite a redirect `Location` into `/` + percent-encoded absolute URL.
///
/// A relative location is resolved against the upstream response's own URL
/// first, so following the rewritten location through the relay lands on the
/// same absolute URL the upstream meant.
pub fn rewrite_location(location: &str, response_url: &Url) -> Result<String, RelayError> {
    let absolute = response_url
        .join(location)
        .map_err(|e| RelayError::RedirectRewrite(format!("{}: {}", location, e)))?;
    Ok(format!("/{}", urlencoding::encode(absolute.as_str())))
}

/// Rewrite root-relative resource references in an HTML body.
///
/// Each matched leading `/` becomes
/// `{inbound_scheme}://{inbound_host}/{target_origin}/`, so following the
/// reference re-enters this relay pointed at the original target's origin.
pub fn rewrite_html(html: &str, inbound: &InboundContext, target: &Url) -> String {
    let origin = target.origin().ascii_serialization();
    ROOT_RELATIVE_ATTR
        .replace_all(html, |caps: &Captures<'_>| {
            format!(
                "{}{}://{}/{}/{}",
                &caps[1], inbound.scheme, inbound.host, origin, &caps[2]
            )
        })
        .into_owned()
}
