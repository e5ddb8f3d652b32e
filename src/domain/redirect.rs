//! Outcome of a redirect resolution.

use axum::http::StatusCode;

/// Decision produced by [`crate::resolver::RedirectResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Redirect to `target`. `status` is `None` when the transport default applies.
    Redirect {
        target: String,
        status: Option<StatusCode>,
    },
    /// Nothing matched; the caller handles the request (usually a 404).
    NoAction,
}

impl RedirectDecision {
    pub fn redirect(target: impl Into<String>, status: StatusCode) -> Self {
        Self::Redirect {
            target: target.into(),
            status: Some(status),
        }
    }

    /// Redirect using the transport's default status.
    pub fn redirect_default(target: impl Into<String>) -> Self {
        Self::Redirect {
            target: target.into(),
            status: None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Redirect { target, .. } => Some(target),
            Self::NoAction => None,
        }
    }
}
