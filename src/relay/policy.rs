//! Cache and CORS policy applied to every outgoing success response.
//!
//! # Design Decisions
//! - `insert` overwrites whatever the upstream sent for these names; the
//!   policy is never merged with upstream values
//! - Idempotent and infallible; runs as the last success-path step

use axum::http::{header, HeaderMap, HeaderValue};

/// Set the relay's unconditional response headers.
pub fn apply_response_policy(headers: &mut HeaderMap) {
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_all_four_headers() {
        let mut headers = HeaderMap::new();
        apply_response_policy(&mut headers);

        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, PUT, DELETE"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
    }

    #[test]
    fn overwrites_upstream_values_instead_of_merging() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=3600"));
        headers.append(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://only.example"),
        );

        apply_response_policy(&mut headers);

        let cache: Vec<_> = headers.get_all(header::CACHE_CONTROL).iter().collect();
        assert_eq!(cache, vec!["no-store"]);
        let origins: Vec<_> = headers
            .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .collect();
        assert_eq!(origins, vec!["*"]);
    }

    #[test]
    fn is_idempotent() {
        let mut once = HeaderMap::new();
        apply_response_policy(&mut once);
        let mut twice = once.clone();
        apply_response_policy(&mut twice);
        assert_eq!(once, twice);
    }
}
