//! Slug lookup keys and case handling.

/// Namespace tag prefixed to every slug in the key-value store.
pub const LINK_KEY_PREFIX: &str = "link:";

/// Builds the store key for a slug.
pub fn link_key(slug: &str) -> String {
    format!("{LINK_KEY_PREFIX}{slug}")
}

/// Slugs to try, in order, for one request.
///
/// Case-sensitive lookups use the slug verbatim. Otherwise the lower-cased
/// slug comes first, followed by the original spelling only when it differs,
/// so links stored before case folding was enabled keep resolving. No other
/// case variants are tried.
pub fn lookup_attempts(slug: &str, case_sensitive: bool) -> Vec<String> {
    if case_sensitive {
        return vec![slug.to_string()];
    }

    let lower = slug.to_lowercase();
    if lower == slug {
        vec![lower]
    } else {
        vec![lower, slug.to_string()]
    }
}
