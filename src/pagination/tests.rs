//! Tests for pagination module

use super::*;
use crate::config::{ClientConfig, Credentials};
use crate::error::ErrorKind;
use crate::http::ThreatExchangeClient;
use crate::types::{ParamValue, Params};
use futures::StreamExt;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test_token";

fn client_for(server: &MockServer) -> ThreatExchangeClient {
    let config = ClientConfig::builder().base_url(server.uri()).build();
    ThreatExchangeClient::with_config(Credentials::new(TOKEN), config).unwrap()
}

/// Page 1 links to page 2 through `after=cursor1`; page 2 is the last.
async fn mount_two_pages(server: &MockServer, second_page_hits: u64) {
    let next = format!(
        "{}/v19.0/threat_descriptors?after=cursor1&limit=500&text=test",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_descriptors"))
        .and(query_param_is_missing("after"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1", "indicator": {"indicator": "page1.com"}}],
            "paging": {"next": next}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_descriptors"))
        .and(query_param("after", "cursor1"))
        .and(query_param("text", "test"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "2", "indicator": {"indicator": "page2.com"}}],
            "paging": {}
        })))
        .expect(second_page_hits)
        .mount(server)
        .await;
}

// ============================================================================
// Page Parsing Tests
// ============================================================================

#[test]
fn test_page_from_body_without_next() {
    let page = Page::from_value(json!({
        "data": [{"id": "1"}, {"id": "2"}],
        "paging": {}
    }));

    assert!(!page.has_next());
    assert_eq!(page.data, vec![json!({"id": "1"}), json!({"id": "2"})]);
}

#[test]
fn test_page_from_body_with_next() {
    let page = Page::from_value(json!({
        "data": [{"id": "1"}],
        "paging": {
            "cursors": {"before": "a", "after": "b"},
            "next": "https://graph.facebook.com/v19.0/threat_tags?after=b"
        }
    }));

    assert!(page.has_next());
    assert_eq!(
        page.next_url.as_deref(),
        Some("https://graph.facebook.com/v19.0/threat_tags?after=b")
    );
}

#[test]
fn test_page_from_body_applies_transform() {
    let page = Page::from_body(json!({"data": [{"id": "7"}, {"id": "8"}]}), |item| {
        item["id"].as_str().unwrap_or_default().to_string()
    });

    assert_eq!(page.data, vec!["7".to_string(), "8".to_string()]);
    assert_eq!(page.len(), 2);
}

#[test]
fn test_page_from_malformed_body_degrades() {
    let page = Page::from_value(json!({"data": "oops", "paging": {"next": 5}}));
    assert!(page.is_empty());
    assert!(!page.has_next());

    let page = Page::from_value(json!({}));
    assert!(page.is_empty());
    assert!(!page.has_next());

    let page = Page::from_value(json!([1, 2, 3]));
    assert!(page.is_empty());

    let page = Page::from_value(json!({"data": [], "paging": "none"}));
    assert!(!page.has_next());
}

#[test]
fn test_page_with_empty_next_is_last() {
    let page = Page::from_value(json!({
        "data": [{"id": "1"}],
        "paging": {"next": ""}
    }));
    assert_eq!(page.len(), 1);
    assert!(!page.has_next());
}

// ============================================================================
// Cursor State Tests
// ============================================================================

#[test]
fn test_cursor_state_transitions() {
    let mut state = CursorState::new(Some(2));
    assert_eq!(state.cursor, Cursor::Start);
    assert!(!state.limit_reached());

    state.record_page(Some("https://x/next".to_string()));
    assert_eq!(state.cursor, Cursor::Next("https://x/next".to_string()));
    assert_eq!(state.pages, 1);

    state.record_item();
    state.record_item();
    assert!(state.limit_reached());

    state.record_page(None);
    assert!(state.is_end());
}

#[test]
fn test_cursor_state_without_limit() {
    let mut state = CursorState::new(None);
    for _ in 0..10_000 {
        state.record_item();
    }
    assert!(!state.limit_reached());
}

// ============================================================================
// Continuation URL Tests
// ============================================================================

#[test]
fn test_parse_continuation_flattens_single_values() {
    let (base, params) = parse_continuation(
        "https://graph.facebook.com/v19.0/threat_descriptors?limit=500&after=QVFI&text=evil",
    )
    .unwrap();

    assert_eq!(base, "https://graph.facebook.com/v19.0/threat_descriptors");
    assert_eq!(params.get("after"), Some(&ParamValue::Single("QVFI".to_string())));
    assert_eq!(params.get_str("limit"), Some("500"));
    assert_eq!(params.get_str("text"), Some("evil"));
}

#[test]
fn test_parse_continuation_keeps_repeated_keys() {
    let (_, params) =
        parse_continuation("https://graph.facebook.com/v19.0/x?type=A&type=B&after=c").unwrap();

    assert_eq!(
        params.get("type"),
        Some(&ParamValue::Multi(vec!["A".to_string(), "B".to_string()]))
    );
    assert_eq!(params.get_str("after"), Some("c"));
}

#[test]
fn test_parse_continuation_keeps_port_and_decodes() {
    let (base, params) =
        parse_continuation("http://127.0.0.1:8080/v19.0/123/threat_updates?fields=id%2Ctype").unwrap();

    assert_eq!(base, "http://127.0.0.1:8080/v19.0/123/threat_updates");
    assert_eq!(params.get_str("fields"), Some("id,type"));
}

#[test]
fn test_parse_continuation_invalid_url() {
    assert!(parse_continuation("not a url").is_err());
}

#[test]
fn test_continuation_request_is_get() {
    let request = continuation_request("https://graph.facebook.com/v19.0/x?after=c").unwrap();
    assert_eq!(request.method, crate::types::Method::GET);
    assert_eq!(request.endpoint, "https://graph.facebook.com/v19.0/x");
    assert_eq!(request.query.get_str("after"), Some("c"));
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[tokio::test]
async fn test_paginator_follows_continuation() {
    let server = MockServer::start().await;
    mount_two_pages(&server, 1).await;

    let client = client_for(&server);
    let mut pager = client.paginate(
        "threat_descriptors",
        Params::new().with("text", "test"),
        None,
    );

    let first = pager.next().await.unwrap().unwrap();
    assert_eq!(first["id"], "1");
    assert_eq!(pager.pages_fetched(), 1);

    let second = pager.next().await.unwrap().unwrap();
    assert_eq!(second["id"], "2");
    assert_eq!(pager.pages_fetched(), 2);

    assert!(pager.next().await.unwrap().is_none());
    assert!(pager.next().await.unwrap().is_none());
    assert_eq!(pager.items_yielded(), 2);
}

#[tokio::test]
async fn test_paginator_limit_stops_before_next_page() {
    let server = MockServer::start().await;
    mount_two_pages(&server, 0).await;

    let client = client_for(&server);
    let items = client
        .paginate("threat_descriptors", Params::new().with("text", "test"), Some(1))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "1");
}

#[tokio::test]
async fn test_paginator_limit_mid_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
            "paging": {"next": format!("{}/v19.0/threat_tags?after=z", server.uri())}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ids: Vec<String> = client
        .paginate_with("threat_tags", Params::new(), Some(2), |item| {
            item["id"].as_str().unwrap_or_default().to_string()
        })
        .collect_all()
        .await
        .unwrap();

    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_paginator_zero_limit_fetches_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = client
        .paginate("threat_tags", Params::new(), Some(0))
        .collect_all()
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_paginator_injects_default_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param("limit", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "t"}]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_indicators"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tags = client
        .paginate("threat_tags", Params::new(), None)
        .collect_all()
        .await
        .unwrap();
    assert_eq!(tags.len(), 1);

    let indicators = client
        .paginate("threat_indicators", Params::new().with("limit", 25_u32), None)
        .collect_all()
        .await
        .unwrap();
    assert!(indicators.is_empty());
}

#[tokio::test]
async fn test_paginator_skips_empty_pages_with_next() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "paging": {"next": format!("{}/v19.0/threat_tags?after=p2", server.uri())}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param("after", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "late"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = client
        .paginate("threat_tags", Params::new(), None)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": "late"})]);
}

#[tokio::test]
async fn test_paginator_is_lazy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pager = client.paginate("threat_tags", Params::new(), None);
    assert_eq!(pager.pages_fetched(), 0);
    drop(pager);
}

#[tokio::test]
async fn test_paginator_error_fuses_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Invalid OAuth access token.", "code": 190}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pager = client.paginate("threat_tags", Params::new(), None);

    let err = pager.next().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(pager.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_paginator_empty_next_ends_traversal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "t1"}],
            "paging": {"next": ""}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = client
        .paginate("threat_tags", Params::new(), None)
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items, vec![json!({"id": "t1"})]);
}

fn rate_limited() -> ResponseTemplate {
    ResponseTemplate::new(400)
        .insert_header("retry-after", "0")
        .set_body_json(json!({
            "error": {"message": "(#4) Application request limit reached", "code": 4}
        }))
}

#[tokio::test]
async fn test_paginator_each_page_gets_fresh_retry_budget() {
    let server = MockServer::start().await;
    let next = format!("{}/v19.0/threat_tags?after=c1", server.uri());

    // Rate-limited mocks are mounted first so they answer the first hit.
    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param_is_missing("after"))
        .respond_with(rate_limited())
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param("after", "c1"))
        .respond_with(rate_limited())
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "t1"}],
            "paging": {"next": next}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v19.0/threat_tags"))
        .and(query_param("after", "c1"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "t2"}],
            "paging": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(server.uri())
        .max_retries(1)
        .build();
    let client = ThreatExchangeClient::with_config(Credentials::new(TOKEN), config).unwrap();

    let items = client
        .paginate("threat_tags", Params::new(), None)
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items, vec![json!({"id": "t1"}), json!({"id": "t2"})]);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_paginator_max_pages_guard() {
    let server = MockServer::start().await;

    // A continuation link pointing back at itself.
    Mock::given(method("GET"))
        .and(path("/v19.0/loop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "x"}],
            "paging": {"next": format!("{}/v19.0/loop?after=same", server.uri())}
        })))
        .expect(3)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(server.uri())
        .max_pages(3)
        .build();
    let client = ThreatExchangeClient::with_config(Credentials::new(TOKEN), config).unwrap();

    let items = client
        .paginate("loop", Params::new(), None)
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn test_paginator_into_stream() {
    let server = MockServer::start().await;
    mount_two_pages(&server, 1).await;

    let client = client_for(&server);
    let ids: Vec<String> = client
        .paginate_with(
            "threat_descriptors",
            Params::new().with("text", "test"),
            None,
            |item: Value| item["id"].as_str().unwrap_or_default().to_string(),
        )
        .into_stream()
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn test_paginator_debug() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let pager = client.paginate("threat_tags", Params::new(), Some(5));
    let debug_str = format!("{pager:?}");
    assert!(debug_str.contains("threat_tags"));
}
