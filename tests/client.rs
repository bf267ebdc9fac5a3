use comparator::client::{ClientError, PcBuildsClient};
use comparator::forms::SearchQuery;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_json(id: &str, price: i64) -> serde_json::Value {
    json!({
        "id": id,
        "company": "PC Shop",
        "title": format!("Build {}", id),
        "description": "Игровой ПК",
        "price": price,
        "price_formatted": "",
        "cpu": "I5-12400F",
        "gpu": "RTX 3060",
        "ram": "16",
        "case_color": null,
        "photo_url": null,
        "vk_url": format!("https://vk.com/market-1?w=product-{}", id),
        "is_our_build": false,
        "parsed_at": "2024-01-15T12:00:00Z"
    })
}

fn client_for(server: &MockServer) -> PcBuildsClient {
    PcBuildsClient::new(&format!("{}/api", server.uri()))
}

#[tokio::test]
async fn our_builds_decodes_catalog() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/builds/our"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([build_json("our_1", 150_000)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let builds = client_for(&mock_server)
        .our_builds()
        .await
        .expect("request failed");

    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].id, "our_1");
    assert_eq!(builds[0].price, 150_000);
}

#[tokio::test]
async fn compare_by_price_posts_typed_form() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/compare/price"))
        .and(body_json(json!({
            "build_id": "our_1",
            "comparison_type": "price"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([build_json("market_1", 190_000)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server)
        .compare_by_price("our_1")
        .await
        .expect("request failed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "market_1");
}

#[tokio::test]
async fn missing_build_maps_to_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/builds/no_such_id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Build not found",
            "details": "Build not found"
        })))
        .mount(&mock_server)
        .await;

    let error = client_for(&mock_server)
        .build("no_such_id")
        .await
        .expect_err("expected an error");

    assert!(matches!(error, ClientError::NotFound));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let error = client_for(&mock_server)
        .statistics()
        .await
        .expect_err("expected an error");

    match error {
        ClientError::RequestFailed(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn search_sends_only_set_filters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("cpu", "i5"))
        .and(query_param("min_price", "100000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filters = SearchQuery {
        cpu: Some("i5".to_string()),
        min_price: Some(100_000),
        ..SearchQuery::default()
    };
    let builds = client_for(&mock_server)
        .search(&filters)
        .await
        .expect("request failed");

    assert!(builds.is_empty());
    // the unset filters must not leak into the query string
    let requests = mock_server
        .received_requests()
        .await
        .expect("requests recorded");
    assert!(!requests[0].url.query().unwrap_or("").contains("gpu"));
}
