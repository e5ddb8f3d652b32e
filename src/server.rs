//! HTTP server initialization and runtime setup.
//!
//! Handles the Redis connection, access log worker spawning, resolver
//! construction and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::access_worker::run_access_log_worker;
use crate::infrastructure::access_log::{AccessLogSink, ChannelAccessLog, RedisAccessLogWriter};
use crate::infrastructure::cache::{LinkStore, RedisLinkStore};
use crate::resolver::RedirectResolver;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis link store (if configured)
/// - Access log queue and background worker (Redis only)
/// - Redirect resolver
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// A Redis connection failure at startup is logged and the service keeps
/// running without a store, so home and inline redirects stay available.
///
/// # Errors
///
/// Returns an error if:
/// - The resolver settings are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let resolver_config = Arc::new(config.resolver_config()?);

    let redis = match &config.redis_url {
        Some(redis_url) => match RedisLinkStore::connect(redis_url).await {
            Ok(store) => {
                tracing::info!("Link store enabled (Redis)");
                Some(store)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Slug lookups disabled.", e);
                None
            }
        },
        None => {
            tracing::info!("Link store disabled (no REDIS_URL)");
            None
        }
    };

    let (store, access_log): (Option<Arc<dyn LinkStore>>, Option<ChannelAccessLog>) = match redis
    {
        Some(store) => {
            let writer = RedisAccessLogWriter::new(
                store.connection(),
                config.access_log_key.clone(),
                config.access_log_max_len,
            );
            let (sink, rx) = ChannelAccessLog::channel(config.access_log_queue_capacity);
            tokio::spawn(run_access_log_worker(rx, Arc::new(writer)));
            tracing::info!("Access log worker started");

            (Some(Arc::new(store)), Some(sink))
        }
        None => (None, None),
    };

    let sink = access_log
        .clone()
        .map(|sink| Arc::new(sink) as Arc<dyn AccessLogSink>);
    let resolver = RedirectResolver::new(resolver_config, store, sink);

    let state = AppState::new(resolver, access_log, config.behind_proxy);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
