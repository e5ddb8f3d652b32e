//! Query string parsing and merging for redirect targets.

use url::form_urlencoded;

/// Parses a raw query string (without the leading `?`) into ordered pairs.
///
/// Keys and values are percent-decoded; repeated keys are kept in order.
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Appends `query` to the query string of `target`.
///
/// Existing parameters of `target` are kept verbatim and the incoming pairs are
/// appended after them, without removing duplicates. A fragment on `target`
/// stays at the end. With no incoming pairs the target is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// let pairs = vec![("ref".to_string(), "x".to_string())];
/// assert_eq!(
///     with_query("https://example.com/p?a=1#top", &pairs),
///     "https://example.com/p?a=1&ref=x#top"
/// );
/// ```
pub fn with_query(target: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return target.to_string();
    }

    let (base, fragment) = match target.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (target, None),
    };

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish();

    let mut merged = String::with_capacity(target.len() + encoded.len() + 2);
    merged.push_str(base);
    if let Some((_, existing)) = base.split_once('?') {
        if !existing.is_empty() && !existing.ends_with('&') {
            merged.push('&');
        }
    } else {
        merged.push('?');
    }
    merged.push_str(&encoded);

    if let Some(fragment) = fragment {
        merged.push('#');
        merged.push_str(fragment);
    }

    merged
}
