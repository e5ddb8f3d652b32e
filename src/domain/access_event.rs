//! Access event model for asynchronous access logging.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkRecord;
use crate::domain::request_context::RequestContext;

/// An in-memory representation of one resolved slug access.
///
/// Built by the resolver after a successful slug lookup and handed to an
/// [`crate::infrastructure::access_log::AccessLogSink`]. This decouples the
/// HTTP response from the log write, so redirects never wait on it.
///
/// # Design
///
/// - Carries the full [`LinkRecord`], opaque attributes included
/// - All client metadata is optional to handle missing headers gracefully
/// - Serialized as one JSON document per entry by the Redis writer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessEvent {
    pub slug: String,
    pub url: String,
    pub link: LinkRecord,
    pub accessed_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl AccessEvent {
    /// Creates an event for `slug` from a context that has a link attached.
    ///
    /// Returns `None` if no link was attached to the context.
    pub fn from_context(slug: &str, ctx: &RequestContext) -> Option<Self> {
        let link = ctx.link()?.clone();

        Some(Self {
            slug: slug.to_string(),
            url: link.url.clone(),
            link,
            accessed_at: Utc::now(),
            ip: ctx.ip.clone(),
            user_agent: ctx.user_agent.clone(),
            referer: ctx.referer.clone(),
        })
    }
}
