//! Redirect resolution for inbound request paths.
//!
//! [`RedirectResolver::resolve`] decides, for one request, between the home
//! redirect, an inline base64 target, a slug lookup, or no action. Branches
//! are evaluated in that fixed order and the first match wins:
//!
//! 1. `/` with a configured home URL redirects there with the default status
//! 2. `b:{payload}` decodes an inline target (never touches the store)
//! 3. a valid, unreserved slug is looked up under `link:{slug}`
//! 4. anything else is [`RedirectDecision::NoAction`]
//!
//! A slug hit dispatches an access log write on a detached task. Its outcome
//! only reaches the error log; the redirect is decided without it. A store
//! failure is not a miss: it ends the resolution with [`ResolveError::Store`].

pub mod config;
pub mod inline;
pub mod lookup;
pub mod path;

pub use config::ResolverConfig;
pub use inline::InlineTargetError;

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::entities::LinkRecord;
use crate::domain::redirect::RedirectDecision;
use crate::domain::request_context::RequestContext;
use crate::infrastructure::access_log::AccessLogSink;
use crate::infrastructure::cache::{CacheError, LinkStore};
use crate::utils::query::with_query;

use inline::{decode_inline_target, inline_payload};
use lookup::{link_key, lookup_attempts};
use path::normalize_slug;

/// Errors that terminate a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Malformed or unsafe inline target. Surfaced as HTTP 400.
    #[error("Bad Request: {0}")]
    BadRequest(#[from] InlineTargetError),

    /// The link store failed and no attempt produced a record. Surfaced as HTTP 500.
    #[error("Link store unavailable: {0}")]
    Store(#[from] CacheError),
}

/// Resolves request paths against the configuration and the link store.
///
/// Cheap to clone; one instance is shared by all requests.
#[derive(Clone)]
pub struct RedirectResolver {
    config: Arc<ResolverConfig>,
    store: Option<Arc<dyn LinkStore>>,
    access_log: Option<Arc<dyn AccessLogSink>>,
}

impl RedirectResolver {
    /// Creates a resolver.
    ///
    /// - `store` - `None` when no key-value backend is available; slug lookups then yield `NoAction`
    /// - `access_log` - `None` to skip access logging (dry runs)
    pub fn new(
        config: Arc<ResolverConfig>,
        store: Option<Arc<dyn LinkStore>>,
        access_log: Option<Arc<dyn AccessLogSink>>,
    ) -> Self {
        Self {
            config,
            store,
            access_log,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> Option<&Arc<dyn LinkStore>> {
        self.store.as_ref()
    }

    /// Resolves one request.
    ///
    /// On a slug hit the matched [`LinkRecord`] is attached to `ctx`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::BadRequest`] for an empty, undecodable or non-http(s) inline target
    /// - [`ResolveError::Store`] when a lookup attempt failed and none produced a record
    pub async fn resolve(&self, ctx: &mut RequestContext) -> Result<RedirectDecision, ResolveError> {
        if ctx.path() == "/"
            && let Some(home) = self.config.home_url.as_deref().filter(|h| !h.is_empty())
        {
            metrics::counter!("redirects_total", "branch" => "home").increment(1);
            return Ok(RedirectDecision::redirect_default(home));
        }

        let slug = normalize_slug(ctx.path()).to_string();

        if let Some(payload) = inline_payload(&slug) {
            return self.resolve_inline(payload, ctx).inspect_err(|e| {
                metrics::counter!("redirect_bad_requests_total").increment(1);
                debug!(slug = %slug, "Rejected inline target: {}", e);
            });
        }

        if slug.is_empty()
            || self.config.is_reserved(&slug)
            || !self.config.slug_pattern.is_match(&slug)
        {
            return Ok(RedirectDecision::NoAction);
        }

        let Some(store) = self.store.as_deref() else {
            return Ok(RedirectDecision::NoAction);
        };

        let found = self
            .lookup(store, &slug)
            .await
            .inspect_err(|_| metrics::counter!("link_store_errors_total").increment(1))?;

        let Some(link) = found else {
            return Ok(RedirectDecision::NoAction);
        };

        let target = self.target_for(&link.url, ctx);
        ctx.attach_link(link);
        self.dispatch_access_log(&slug, ctx);

        metrics::counter!("redirects_total", "branch" => "slug").increment(1);
        Ok(RedirectDecision::redirect(target, self.config.redirect_status))
    }

    fn resolve_inline(
        &self,
        payload: &str,
        ctx: &RequestContext,
    ) -> Result<RedirectDecision, ResolveError> {
        let decoded = decode_inline_target(payload)?;
        let target = self.target_for(&decoded, ctx);

        metrics::counter!("redirects_total", "branch" => "inline").increment(1);
        Ok(RedirectDecision::redirect(target, self.config.redirect_status))
    }

    /// Tries each candidate slug in order and returns the first parsed record.
    ///
    /// Values that are not link records count as misses. A store error does
    /// not stop the remaining attempts, but if none of them hits, the last
    /// error is returned instead of a miss.
    async fn lookup(
        &self,
        store: &dyn LinkStore,
        slug: &str,
    ) -> Result<Option<LinkRecord>, CacheError> {
        let attempts = lookup_attempts(slug, self.config.case_sensitive);
        let mut failure = None;

        for (i, candidate) in attempts.iter().enumerate() {
            if i > 0 {
                info!(
                    "original slug fallback: slug:{} lowerCaseSlug:{}",
                    slug, attempts[0]
                );
            }

            let key = link_key(candidate);
            match store.get(&key, self.config.link_cache_ttl).await {
                Ok(Some(value)) => match LinkRecord::from_value(value) {
                    Some(link) => return Ok(Some(link)),
                    None => warn!("Ignoring malformed link record at {}", key),
                },
                Ok(None) => debug!("Link not found: {}", key),
                Err(e) => {
                    error!("Link store error for {}: {}", key, e);
                    failure = Some(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    fn target_for(&self, url: &str, ctx: &RequestContext) -> String {
        if self.config.redirect_with_query {
            with_query(url, ctx.query())
        } else {
            url.to_string()
        }
    }

    /// Hands the access event to the sink on a detached task.
    fn dispatch_access_log(&self, slug: &str, ctx: &RequestContext) {
        let Some(sink) = self.access_log.clone() else {
            return;
        };
        let Some(event) = AccessEvent::from_context(slug, ctx) else {
            return;
        };

        tokio::spawn(async move {
            let slug = event.slug.clone();
            if let Err(e) = sink.record(event).await {
                metrics::counter!("access_log_failures_total").increment(1);
                error!(slug = %slug, "Failed write access log: {}", e);
            }
        });
    }
}
