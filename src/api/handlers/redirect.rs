//! Handler resolving every unrouted path.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::redirect::RedirectDecision;
use crate::domain::request_context::RequestContext;
use crate::error::AppError;
use crate::resolver::inline::inline_payload;
use crate::resolver::path::normalize_slug;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Status used when a decision carries no explicit status (home redirect).
pub const DEFAULT_REDIRECT_STATUS: StatusCode = StatusCode::FOUND;

/// Resolves the request path into a redirect.
///
/// # Endpoint
///
/// Router fallback: any path not matched by another route.
///
/// # Request Flow
///
/// 1. Build a [`RequestContext`] from the raw path, query and client metadata
/// 2. Run [`crate::resolver::RedirectResolver::resolve`]
/// 3. Map the decision to an HTTP response
///
/// # Responses
///
/// - **3xx** with `Location` on a redirect (302 for the home URL, the configured status otherwise)
/// - **400 Bad Request** for an invalid inline target
/// - **404 Not Found** when nothing matched
/// - **500 Internal Server Error** when the link store fails, or when a
///   configured or stored target cannot be sent as a `Location` header
pub async fn redirect_handler(State(state): State<AppState>, request: Request) -> Response {
    match resolve_request(&state, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn resolve_request(state: &AppState, request: Request) -> Result<Response, AppError> {
    let mut ctx = {
        let uri = request.uri();
        let headers = request.headers();
        let peer = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        RequestContext::new(uri.path(), uri.query()).with_client(
            client_ip(headers, peer, state.behind_proxy),
            headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()),
            headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        )
    };

    let decision = state.resolver.resolve(&mut ctx).await?;

    match decision {
        RedirectDecision::Redirect { target, status } => {
            let status = status.unwrap_or(DEFAULT_REDIRECT_STATUS);
            let location = HeaderValue::try_from(target.as_str()).map_err(|_| {
                if is_inline_request(&ctx) {
                    AppError::bad_request("Bad Request", json!({ "reason": "invalid target" }))
                } else {
                    error!("Redirect target is not a valid header value: {:?}", target);
                    AppError::internal("Invalid redirect target", json!({}))
                }
            })?;

            debug!("Redirect {} -> {} ({})", ctx.path(), target, status);
            Ok((status, [(header::LOCATION, location)]).into_response())
        }
        RedirectDecision::NoAction => Err(AppError::not_found(
            "Not Found",
            json!({ "path": ctx.path() }),
        )),
    }
}

/// Inline targets come from the request itself; every other target is server data.
fn is_inline_request(ctx: &RequestContext) -> bool {
    inline_payload(normalize_slug(ctx.path())).is_some()
}
