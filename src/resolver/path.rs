//! Request path normalization.

/// Extracts the slug from a raw request path.
///
/// Anything from the first `?` or `#` on is dropped, then the surrounding
/// slashes are stripped. The result is not percent-decoded.
///
/// The function is a fixed point on its own output:
/// `normalize_slug(normalize_slug(p)) == normalize_slug(p)`.
pub fn normalize_slug(raw_path: &str) -> &str {
    let pathname = match raw_path.find(['?', '#']) {
        Some(end) => &raw_path[..end],
        None => raw_path,
    };

    pathname.trim_matches('/')
}
