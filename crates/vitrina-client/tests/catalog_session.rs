//! Integration tests for `CatalogSession`: debouncing and stale-response
//! supersession against a `wiremock` server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitrina_client::{ApiClient, CatalogSession};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 5, "vitrina-test/0.1").expect("failed to build test ApiClient")
}

fn listing(ids: &[&str], total: u64) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({"id": id, "name": format!("Item {id}"), "inStock": true}))
        .collect();
    json!({"items": items, "total": total})
}

#[tokio::test]
async fn search_burst_issues_one_request_for_last_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("search", "charizard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["p-1"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    // Any other listing request means the debounce leaked a stale search.
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[], 0)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::from_millis(50));

    let (first, second, third) = tokio::join!(
        session.search("c"),
        session.search("char"),
        session.search("charizard"),
    );

    assert!(first.unwrap().is_none(), "superseded search must not fetch");
    assert!(second.unwrap().is_none(), "superseded search must not fetch");
    let results = third.unwrap().expect("latest search should produce results");
    assert_eq!(results.filter.search(), "charizard");
    assert_eq!(results.page.items[0].id, "p-1");
}

#[tokio::test]
async fn stale_response_is_discarded_when_newer_request_wins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param_is_missing("collection"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing(&["old"], 1))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("collection", "figures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["new"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::ZERO);

    let stale = session.refresh();
    let fresh = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        session.set_collection(Some("figures".to_owned())).await
    };
    let (stale, fresh) = tokio::join!(stale, fresh);

    assert!(stale.unwrap().is_none(), "late stale response must be dropped");
    let fresh = fresh.unwrap().expect("newer request should win");
    assert_eq!(fresh.page.items[0].id, "new");
}

#[tokio::test]
async fn stale_error_is_discarded_too() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param_is_missing("inStock"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("inStock", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["p-1"], 1)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::ZERO);

    let stale = session.refresh();
    let fresh = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        session.set_in_stock_only(true).await
    };
    let (stale, fresh) = tokio::join!(stale, fresh);

    assert!(stale.expect("stale error should be swallowed").is_none());
    assert!(fresh.unwrap().is_some());
}

#[tokio::test]
async fn results_carry_total_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("limit", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["p-1"], 50)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::ZERO);

    let results = session.refresh().await.unwrap().expect("single request wins");
    assert_eq!(results.total_pages, 3);
}

#[tokio::test]
async fn empty_listing_has_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[], 0)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::ZERO);

    let results = session.refresh().await.unwrap().expect("single request wins");
    assert_eq!(results.total_pages, 1);
    assert!(results.page.items.is_empty());
}

#[tokio::test]
async fn changing_collection_clears_category_in_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("collection", "figures"))
        .and(query_param_is_missing("category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["f-1"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[], 0)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::ZERO);

    session.set_collection(Some("tcg".to_owned())).await.unwrap();
    session.set_category(Some("pokemon".to_owned())).await.unwrap();
    assert_eq!(session.filter().category(), Some("pokemon"));

    let results = session
        .set_collection(Some("figures".to_owned()))
        .await
        .unwrap()
        .expect("latest request wins");
    assert_eq!(results.filter.category(), None);
    assert_eq!(results.page.items[0].id, "f-1");
}

#[tokio::test]
async fn filter_change_during_debounce_fetches_without_pending_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("collection", "figures"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["f-1"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    // The half-typed text must never reach the server.
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[], 0)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = CatalogSession::new(&client, 24, Duration::from_millis(200));

    let typing = session.search("char");
    let pick = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.set_collection(Some("figures".to_owned())).await
    };
    let (typing, pick) = tokio::join!(typing, pick);

    assert!(typing.unwrap().is_none(), "search superseded by the filter change");
    let results = pick.unwrap().expect("filter change wins");
    assert_eq!(results.filter.search(), "");
    assert_eq!(results.page.items[0].id, "f-1");
    assert_eq!(session.filter().search(), "");
}
