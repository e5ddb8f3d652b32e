mod common;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use slug_redirect::infrastructure::cache::MemoryLinkStore;
use slug_redirect::resolver::ResolverConfig;
use std::sync::Arc;

fn inline_path(url: &str) -> String {
    format!("/b:{}", URL_SAFE_NO_PAD.encode(url))
}

#[tokio::test]
async fn test_home_redirect() {
    let (state, _rx) = common::create_test_state(common::test_config(), None);
    let server = common::test_server(state);

    let response = server.get("/").add_query_param("utm", "1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), common::HOME_URL);
}

#[tokio::test]
async fn test_root_without_home_not_found() {
    let config = ResolverConfig {
        home_url: None,
        ..common::test_config()
    };
    let (state, _rx) = common::create_test_state(config, Some(MemoryLinkStore::new()));
    let server = common::test_server(state);

    let response = server.get("/").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_inline_redirect() {
    let (state, mut rx) = common::create_test_state(common::test_config(), None);
    let server = common::test_server(state);

    let response = server
        .get(&inline_path("https://example.com/x"))
        .add_query_param("utm", "1")
        .await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/x");
    assert!(common::next_event(&mut rx).await.is_none());
}

#[tokio::test]
async fn test_inline_redirect_with_query() {
    let config = ResolverConfig {
        redirect_with_query: true,
        ..common::test_config()
    };
    let (state, _rx) = common::create_test_state(config, None);
    let server = common::test_server(state);

    let response = server
        .get(&inline_path("https://example.com/x?a=1"))
        .add_query_param("a", "2")
        .await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/x?a=1&a=2");
}

#[tokio::test]
async fn test_inline_empty_payload() {
    let (state, _rx) = common::create_test_state(common::test_config(), None);
    let server = common::test_server(state);

    let response = server.get("/b:").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "bad_request");
    assert_eq!(json["error"]["message"], "Bad Request");
}

#[tokio::test]
async fn test_inline_rejects_javascript_scheme() {
    let (state, _rx) = common::create_test_state(common::test_config(), None);
    let server = common::test_server(state);

    let response = server.get(&inline_path("javascript:alert(1)")).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_slug_redirect_records_access() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "abc", "https://example.com/target");
    let (state, mut rx) = common::create_test_state(common::test_config(), Some(store));
    let server = common::test_server(state);

    let response = server
        .get("/abc")
        .add_header("User-Agent", "TestBot/1.0")
        .add_header("Referer", "https://google.com")
        .await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");

    let event = common::next_event(&mut rx).await.unwrap();
    assert_eq!(event.slug, "abc");
    assert_eq!(event.url, "https://example.com/target");
    assert_eq!(event.ip.as_deref(), Some("127.0.0.1"));
    assert_eq!(event.user_agent.as_deref(), Some("TestBot/1.0"));
    assert_eq!(event.referer.as_deref(), Some("https://google.com"));
    assert_eq!(event.link.attribute("slug"), Some(&serde_json::json!("abc")));
}

#[tokio::test]
async fn test_slug_redirect_uses_configured_status() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "perm", "https://example.com/p");
    let (state, _rx) = common::create_test_state(ResolverConfig::default(), Some(store));
    let server = common::test_server(state);

    let response = server.get("/perm/").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/p");
}

#[tokio::test]
async fn test_slug_redirect_with_repeated_slashes() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "abc", "https://example.com/target");
    let (state, _rx) = common::create_test_state(common::test_config(), Some(store));
    let server = common::test_server(state);

    let response = server.get("/abc//").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_slug_redirect_with_query() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "abc", "https://example.com/target");
    let config = ResolverConfig {
        redirect_with_query: true,
        ..common::test_config()
    };
    let (state, _rx) = common::create_test_state(config, Some(store));
    let server = common::test_server(state);

    let response = server.get("/abc").add_query_param("ref", "mail").await;

    assert_eq!(response.header("location"), "https://example.com/target?ref=mail");
}

#[tokio::test]
async fn test_case_insensitive_fallback_to_original_slug() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "MySlug", "https://example.com/legacy");
    let (state, _rx) = common::create_test_state(common::test_config(), Some(store));
    let server = common::test_server(state);

    let response = server.get("/MySlug").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/legacy");
}

#[tokio::test]
async fn test_case_insensitive_matches_lowercase_record() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "myslug", "https://example.com/lower");
    let (state, _rx) = common::create_test_state(common::test_config(), Some(store));
    let server = common::test_server(state);

    let response = server.get("/MYSLUG").await;

    assert_eq!(response.header("location"), "https://example.com/lower");
}

#[tokio::test]
async fn test_case_sensitive_requires_exact_slug() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "MySlug", "https://example.com/legacy");
    let config = ResolverConfig {
        case_sensitive: true,
        ..common::test_config()
    };
    let (state, _rx) = common::create_test_state(config, Some(store));
    let server = common::test_server(state);

    server.get("/myslug").await.assert_status_not_found();
    assert_eq!(server.get("/MySlug").await.status_code(), 302);
}

#[tokio::test]
async fn test_reserved_slug_not_found() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "dashboard", "https://example.com/should-not-redirect");
    let (state, mut rx) = common::create_test_state(common::test_config(), Some(store));
    let server = common::test_server(state);

    server.get("/dashboard").await.assert_status_not_found();
    assert!(common::next_event(&mut rx).await.is_none());
}

#[tokio::test]
async fn test_unknown_slug_not_found() {
    let (state, _rx) =
        common::create_test_state(common::test_config(), Some(MemoryLinkStore::new()));
    let server = common::test_server(state);

    server.get("/notfound").await.assert_status_not_found();
    server.get("/not_a_slug").await.assert_status_not_found();
}

#[tokio::test]
async fn test_no_store_not_found() {
    let (state, _rx) = common::create_test_state(common::test_config(), None);
    let server = common::test_server(state);

    server.get("/abc").await.assert_status_not_found();
}

#[tokio::test]
async fn test_failed_access_log_keeps_redirect() {
    let store = MemoryLinkStore::new();
    common::insert_link(&store, "abc", "https://example.com/target");
    let (sink, mut attempts) = common::failing_access_log();
    let state = common::create_state_with_sink(common::test_config(), store, Arc::new(sink));
    let server = common::test_server(state);

    let response = server.get("/abc").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(attempts.recv().await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let state =
        common::create_state_with_store(common::test_config(), Arc::new(common::FailingLinkStore));
    let server = common::test_server(state);

    let response = server.get("/abc").await;

    assert_eq!(response.status_code(), 500);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
}

#[tokio::test]
async fn test_store_failure_keeps_home_and_inline() {
    let state =
        common::create_state_with_store(common::test_config(), Arc::new(common::FailingLinkStore));
    let server = common::test_server(state);

    assert_eq!(server.get("/").await.status_code(), 302);
    assert_eq!(
        server.get(&inline_path("https://example.com/x")).await.status_code(),
        302
    );
}

#[tokio::test]
async fn test_unusable_home_url_is_server_error() {
    let config = ResolverConfig {
        home_url: Some("https://home.example/\nx".to_string()),
        ..common::test_config()
    };
    let (state, _rx) = common::create_test_state(config, None);
    let server = common::test_server(state);

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 500);
}
