//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! The redirect settings are compiled into an immutable
//! [`ResolverConfig`](crate::resolver::ResolverConfig) shared by all requests.
//!
//! ## Key-Value Backend
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! or, component by component:
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without Redis the service still answers home and inline (`/b:...`)
//! redirects, but every slug falls through to 404.
//!
//! ## Redirect Variables
//!
//! - `HOME_URL` - Redirect target for `/` (default: unset)
//! - `SLUG_REGEX` - Slug validation pattern (default: dash-separated alphanumerics, any case)
//! - `RESERVED_SLUGS` - Comma-separated slugs never looked up (default: `dashboard`)
//! - `LINK_CACHE_TTL` - Lookup cache TTL in seconds (default: 60)
//! - `REDIRECT_WITH_QUERY` - Forward the request query string (default: false)
//! - `CASE_SENSITIVE` - Case-sensitive slug lookups (default: false)
//! - `REDIRECT_STATUS_CODE` - 3xx status for link redirects (default: 301)
//!
//! ## Other Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` / `X-Real-IP` (default: false)
//! - `ACCESS_LOG_QUEUE_CAPACITY` - Access event buffer size (default: 10000, min: 100)
//! - `ACCESS_LOG_KEY` - Redis list receiving access events (default: `access_logs`)
//! - `ACCESS_LOG_MAX_LEN` - Maximum entries kept in that list (default: 100000)

use anyhow::{Context, Result};
use axum::http::{HeaderValue, StatusCode};
use regex::Regex;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::resolver::ResolverConfig;
use crate::resolver::config::{DEFAULT_RESERVED_SLUGS, DEFAULT_SLUG_PATTERN};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, access logs read the client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    // ── Redirect settings ───────────────────────────────────────────────────
    /// Redirect target for `/`. Empty values are treated as unset.
    pub home_url: Option<String>,
    pub slug_regex: String,
    pub reserved_slugs: Vec<String>,
    /// TTL hint (seconds) for link lookups.
    pub link_cache_ttl_seconds: u64,
    pub redirect_with_query: bool,
    pub case_sensitive: bool,
    pub redirect_status_code: u16,

    // ── Access log ──────────────────────────────────────────────────────────
    pub access_log_queue_capacity: usize,
    pub access_log_key: String,
    pub access_log_max_len: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparsable numbers fall back to their defaults; [`Config::validate`]
    /// catches values that parse but are out of range.
    pub fn from_env() -> Self {
        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let behind_proxy = env_flag("BEHIND_PROXY", false);

        let home_url = env::var("HOME_URL").ok().filter(|v| !v.trim().is_empty());
        let slug_regex =
            env::var("SLUG_REGEX").unwrap_or_else(|_| DEFAULT_SLUG_PATTERN.to_string());
        let reserved_slugs = env::var("RESERVED_SLUGS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| DEFAULT_RESERVED_SLUGS.iter().map(|s| s.to_string()).collect());

        Self {
            redis_url,
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            home_url,
            slug_regex,
            reserved_slugs,
            link_cache_ttl_seconds: env_parse("LINK_CACHE_TTL", 60),
            redirect_with_query: env_flag("REDIRECT_WITH_QUERY", false),
            case_sensitive: env_flag("CASE_SENSITIVE", false),
            redirect_status_code: env_parse("REDIRECT_STATUS_CODE", 301),
            access_log_queue_capacity: env_parse("ACCESS_LOG_QUEUE_CAPACITY", 10_000),
            access_log_key: env::var("ACCESS_LOG_KEY")
                .unwrap_or_else(|_| "access_logs".to_string()),
            access_log_max_len: env_parse("ACCESS_LOG_MAX_LEN", 100_000),
        }
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `redis_url` has an unknown scheme
    /// - `slug_regex` does not compile
    /// - `home_url` contains characters not allowed in a header value
    /// - `redirect_status_code` is not a 3xx status
    /// - `link_cache_ttl_seconds`, `access_log_max_len` or the queue capacity are out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        Regex::new(&self.slug_regex)
            .with_context(|| format!("SLUG_REGEX is not a valid pattern: '{}'", self.slug_regex))?;

        if let Some(ref home_url) = self.home_url
            && HeaderValue::from_str(home_url).is_err()
        {
            anyhow::bail!("HOME_URL is not usable as a Location header: {:?}", home_url);
        }

        if !(300..=399).contains(&self.redirect_status_code) {
            anyhow::bail!(
                "REDIRECT_STATUS_CODE must be a 3xx status, got {}",
                self.redirect_status_code
            );
        }

        if self.link_cache_ttl_seconds == 0 {
            anyhow::bail!("LINK_CACHE_TTL must be greater than 0");
        }

        if self.access_log_queue_capacity < 100 {
            anyhow::bail!(
                "ACCESS_LOG_QUEUE_CAPACITY must be at least 100, got {}",
                self.access_log_queue_capacity
            );
        }

        if self.access_log_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "ACCESS_LOG_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.access_log_queue_capacity
            );
        }

        if self.access_log_key.is_empty() {
            anyhow::bail!("ACCESS_LOG_KEY must not be empty");
        }

        if self.access_log_max_len == 0 {
            anyhow::bail!("ACCESS_LOG_MAX_LEN must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether a key-value backend is configured.
    pub fn is_store_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Builds the immutable resolver settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug pattern or the status code is invalid.
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let slug_pattern = Regex::new(&self.slug_regex)
            .with_context(|| format!("SLUG_REGEX is not a valid pattern: '{}'", self.slug_regex))?;

        let redirect_status = StatusCode::from_u16(self.redirect_status_code)
            .context("REDIRECT_STATUS_CODE is not a valid status")?;
        if !redirect_status.is_redirection() {
            anyhow::bail!(
                "REDIRECT_STATUS_CODE must be a 3xx status, got {}",
                self.redirect_status_code
            );
        }

        Ok(ResolverConfig {
            home_url: self.home_url.clone(),
            slug_pattern,
            reserved_slugs: self.reserved_slugs.iter().cloned().collect(),
            link_cache_ttl: Duration::from_secs(self.link_cache_ttl_seconds),
            redirect_with_query: self.redirect_with_query,
            case_sensitive: self.case_sensitive,
            redirect_status,
        })
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {} (enabled)", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Redis: disabled (slug lookups off)");
        }

        tracing::info!("  Home URL: {}", self.home_url.as_deref().unwrap_or("-"));
        tracing::info!("  Slug pattern: {}", self.slug_regex);
        tracing::info!("  Reserved slugs: {}", self.reserved_slugs.join(","));
        tracing::info!("  Link cache TTL: {}s", self.link_cache_ttl_seconds);
        tracing::info!(
            "  Redirect: status {}, with query {}, case sensitive {}",
            self.redirect_status_code,
            self.redirect_with_query,
            self.case_sensitive
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Access log queue capacity: {}",
            self.access_log_queue_capacity
        );
    }
}

/// Reads a boolean flag. `true`/`1` (any case) enable it, anything else disables it.
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Splits a comma-separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`.
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
