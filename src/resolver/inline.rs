//! Inline base64 redirect targets (`/b:{payload}`).

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{self, GeneralPurpose};
use thiserror::Error;

/// Slug prefix marking an inline-encoded target.
pub const INLINE_PREFIX: &str = "b:";

/// Standard alphabet, tolerant of non-zero trailing bits in the last symbol.
const INLINE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_allow_trailing_bits(true),
);

/// Reasons an inline target is rejected. All map to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InlineTargetError {
    #[error("empty inline payload")]
    Empty,

    #[error("inline payload is not valid base64")]
    InvalidEncoding,

    #[error("inline target is not valid UTF-8")]
    InvalidText,

    #[error("inline target must use http or https")]
    DisallowedScheme,
}

/// Returns the payload of an inline slug, or `None` if `slug` is not inline.
pub fn inline_payload(slug: &str) -> Option<&str> {
    slug.strip_prefix(INLINE_PREFIX)
}

/// Decodes a URL-safe base64 payload into an http(s) URL.
///
/// `-` and `_` are mapped to `+` and `/` and the payload is padded with `=`
/// to a multiple of four before decoding.
///
/// # Errors
///
/// - [`InlineTargetError::Empty`] for an empty payload
/// - [`InlineTargetError::InvalidEncoding`] when base64 decoding fails
/// - [`InlineTargetError::InvalidText`] when the bytes are not UTF-8
/// - [`InlineTargetError::DisallowedScheme`] unless the URL starts with `http://` or `https://`
pub fn decode_inline_target(payload: &str) -> Result<String, InlineTargetError> {
    if payload.is_empty() {
        return Err(InlineTargetError::Empty);
    }

    let mut standard = payload.replace('-', "+").replace('_', "/");
    let padding = standard.len() % 4;
    if padding != 0 {
        standard.push_str(&"=".repeat(4 - padding));
    }

    let bytes = INLINE_ENGINE
        .decode(standard.as_bytes())
        .map_err(|_| InlineTargetError::InvalidEncoding)?;

    let decoded = String::from_utf8(bytes).map_err(|_| InlineTargetError::InvalidText)?;

    if !decoded.starts_with("http://") && !decoded.starts_with("https://") {
        return Err(InlineTargetError::DisallowedScheme);
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn encode(url: &str) -> String {
        URL_SAFE_NO_PAD.encode(url)
    }

    #[test]
    fn test_inline_payload() {
        assert_eq!(inline_payload("b:abc"), Some("abc"));
        assert_eq!(inline_payload("b:"), Some(""));
        assert_eq!(inline_payload("abc"), None);
        assert_eq!(inline_payload("B:abc"), None);
    }

    #[test]
    fn test_decode_https() {
        let payload = encode("https://example.com/x");

        assert_eq!(
            decode_inline_target(&payload).unwrap(),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_decode_url_safe_symbols() {
        // Encodes to a payload containing both '-' and '_'.
        let url = "https://example.com/?q=>>>???";
        let payload = encode(url);
        assert!(payload.contains('-') || payload.contains('_'));

        assert_eq!(decode_inline_target(&payload).unwrap(), url);
    }

    #[test]
    fn test_decode_accepts_explicit_padding() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode("http://a.io");

        assert_eq!(decode_inline_target(&payload).unwrap(), "http://a.io");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_inline_target(""), Err(InlineTargetError::Empty));
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert_eq!(
            decode_inline_target("not base64!"),
            Err(InlineTargetError::InvalidEncoding)
        );
        // A single leftover symbol can never be valid.
        assert_eq!(
            decode_inline_target("aHR0cHM6Ly9h1"),
            Err(InlineTargetError::InvalidEncoding)
        );
    }

    #[test]
    fn test_decode_rejects_other_schemes() {
        for url in [
            "javascript:alert(1)",
            "file:///etc/passwd",
            "//evil.example",
            "/relative",
            "ftp://example.com",
            "HTTPS://example.com",
        ] {
            assert_eq!(
                decode_inline_target(&encode(url)),
                Err(InlineTargetError::DisallowedScheme),
                "url {url:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let payload = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);

        assert_eq!(
            decode_inline_target(&payload),
            Err(InlineTargetError::InvalidText)
        );
    }
}
