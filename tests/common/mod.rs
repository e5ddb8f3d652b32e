#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use serde_json::{Value, json};
use slug_redirect::domain::access_event::AccessEvent;
use slug_redirect::infrastructure::access_log::{AccessLogError, AccessLogSink, ChannelAccessLog};
use slug_redirect::infrastructure::cache::{CacheError, CacheResult, LinkStore, MemoryLinkStore};
use slug_redirect::resolver::{RedirectResolver, ResolverConfig};
use slug_redirect::routes::app_router;
use slug_redirect::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

pub const HOME_URL: &str = "https://home.example";

/// Resolver settings used by most tests: home URL set, 302 redirects.
pub fn test_config() -> ResolverConfig {
    ResolverConfig {
        home_url: Some(HOME_URL.to_string()),
        redirect_status: axum::http::StatusCode::FOUND,
        ..ResolverConfig::default()
    }
}

pub fn insert_link(store: &MemoryLinkStore, slug: &str, url: &str) {
    store.insert(format!("link:{slug}"), json!({ "url": url, "slug": slug }));
}

/// Sink that always fails, as if the log backend timed out.
pub struct FailingAccessLog {
    attempts: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl AccessLogSink for FailingAccessLog {
    async fn record(&self, event: AccessEvent) -> Result<(), AccessLogError> {
        let _ = self.attempts.send(event.slug);
        Err(AccessLogError::Backend("timeout".to_string()))
    }
}

pub fn failing_access_log() -> (FailingAccessLog, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FailingAccessLog { attempts: tx }, rx)
}

/// Store whose backend is unreachable.
pub struct FailingLinkStore;

#[async_trait]
impl LinkStore for FailingLinkStore {
    async fn get(&self, _key: &str, _ttl: Duration) -> CacheResult<Option<Value>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Builds state around an arbitrary link store, without access logging.
pub fn create_state_with_store(config: ResolverConfig, store: Arc<dyn LinkStore>) -> AppState {
    let resolver = RedirectResolver::new(Arc::new(config), Some(store), None);
    AppState::new(resolver, None, false)
}

/// Builds state with an in-memory store and a queue-backed access log.
pub fn create_test_state(
    config: ResolverConfig,
    store: Option<MemoryLinkStore>,
) -> (AppState, mpsc::Receiver<AccessEvent>) {
    let (sink, rx) = ChannelAccessLog::channel(100);

    let resolver = RedirectResolver::new(
        Arc::new(config),
        store.map(|s| Arc::new(s) as Arc<dyn LinkStore>),
        Some(Arc::new(sink.clone()) as Arc<dyn AccessLogSink>),
    );

    (AppState::new(resolver, Some(sink), false), rx)
}

/// Builds state whose access log sink is `sink`.
pub fn create_state_with_sink(
    config: ResolverConfig,
    store: MemoryLinkStore,
    sink: Arc<dyn AccessLogSink>,
) -> AppState {
    let resolver = RedirectResolver::new(Arc::new(config), Some(Arc::new(store)), Some(sink));
    AppState::new(resolver, None, false)
}

pub fn test_server(state: AppState) -> TestServer {
    let app: Router = app_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Waits for the next queued access event.
pub async fn next_event(rx: &mut mpsc::Receiver<AccessEvent>) -> Option<AccessEvent> {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .ok()
        .flatten()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
