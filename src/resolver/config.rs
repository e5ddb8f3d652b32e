//! Immutable resolver settings.

use axum::http::StatusCode;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

/// Slugs made of ASCII letters and digits in dash-separated groups, any case.
pub const DEFAULT_SLUG_PATTERN: &str = r"(?i)^[a-z0-9]+(?:-[a-z0-9]+)*$";

pub const DEFAULT_RESERVED_SLUGS: &[&str] = &["dashboard"];

pub const DEFAULT_LINK_CACHE_TTL: Duration = Duration::from_secs(60);

pub const DEFAULT_REDIRECT_STATUS: StatusCode = StatusCode::MOVED_PERMANENTLY;

static DEFAULT_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_SLUG_PATTERN).expect("default slug pattern is valid"));

/// Settings consumed by [`crate::resolver::RedirectResolver`].
///
/// Built once at startup by [`crate::config::Config::resolver_config`] and
/// shared read-only between requests.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Target for requests to `/`. `None` disables the home redirect.
    pub home_url: Option<String>,
    pub slug_pattern: Regex,
    pub reserved_slugs: HashSet<String>,
    /// TTL hint passed to every store lookup.
    pub link_cache_ttl: Duration,
    /// Forward the request query string to the redirect target.
    pub redirect_with_query: bool,
    pub case_sensitive: bool,
    /// Status for inline and slug redirects. Always a 3xx.
    pub redirect_status: StatusCode,
}

impl ResolverConfig {
    pub fn is_reserved(&self, slug: &str) -> bool {
        self.reserved_slugs.contains(slug)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            home_url: None,
            slug_pattern: DEFAULT_SLUG_REGEX.clone(),
            reserved_slugs: DEFAULT_RESERVED_SLUGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            link_cache_ttl: DEFAULT_LINK_CACHE_TTL,
            redirect_with_query: false,
            case_sensitive: false,
            redirect_status: DEFAULT_REDIRECT_STATUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slug_pattern() {
        let config = ResolverConfig::default();

        assert!(config.slug_pattern.is_match("abc"));
        assert!(config.slug_pattern.is_match("MySlug"));
        assert!(config.slug_pattern.is_match("my-slug-2"));
        assert!(!config.slug_pattern.is_match("b:aGk"));
        assert!(!config.slug_pattern.is_match("a/b"));
        assert!(!config.slug_pattern.is_match("-abc"));
        assert!(!config.slug_pattern.is_match("abc-"));
        assert!(!config.slug_pattern.is_match(""));
    }

    #[test]
    fn test_default_reserved() {
        let config = ResolverConfig::default();

        assert!(config.is_reserved("dashboard"));
        assert!(!config.is_reserved("Dashboard"));
        assert_eq!(config.redirect_status, StatusCode::MOVED_PERMANENTLY);
    }
}
