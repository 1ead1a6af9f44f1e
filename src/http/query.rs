//! URI and query-string splitting.
//!
//! Mirrors `httpd_query_key_value`: pairs split on `&`, key and value split
//! on the first `=`, keys matched exactly, first match wins, no
//! percent-decoding.  Every value we accept is plain decimal anyway.

/// Split a request URI into its path and optional query string.
pub fn split_uri(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    }
}

/// Value of the first `key=value` pair whose key equals `key`.
/// A bare `key` with no `=` yields an empty value.
pub fn query_value<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
