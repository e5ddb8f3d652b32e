//! Per-request context handed to the resolver.

use crate::domain::entities::LinkRecord;
use crate::utils::query::parse_query;

/// Immutable view of one inbound request plus a slot for the resolved link.
///
/// The link slot is only filled by the slug lookup branch of
/// [`crate::resolver::RedirectResolver`], after the stored value parsed into a
/// [`LinkRecord`]. Downstream consumers (the access log) read it from here.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    path: String,
    query: Vec<(String, String)>,
    link: Option<LinkRecord>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl RequestContext {
    /// Creates a context from the raw path and the raw query string (without `?`).
    pub fn new(path: impl Into<String>, raw_query: Option<&str>) -> Self {
        Self {
            path: path.into(),
            query: raw_query.map(parse_query).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Attaches client metadata used by the access log.
    pub fn with_client(
        mut self,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        self.ip = ip;
        self.user_agent = user_agent.map(|s| s.to_string());
        self.referer = referer.map(|s| s.to_string());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in request order, duplicates preserved.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn link(&self) -> Option<&LinkRecord> {
        self.link.as_ref()
    }

    pub(crate) fn attach_link(&mut self, link: LinkRecord) {
        self.link = Some(link);
    }
}
