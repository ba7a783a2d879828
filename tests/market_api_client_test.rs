//! MarketApiClient against a local mock HTTP server

use pazar_lib::modules::market::infrastructure::{RateLimitClient, RetryPolicy};
use pazar_lib::modules::market::{ListingQuery, MarketApiClient, MarketDataSource};
use pazar_lib::shared::AppError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(server: &MockServer) -> MarketApiClient {
    let policy = RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        backoff_multiplier: 2.0,
        jitter: 0.0,
    };
    let http = RateLimitClient::new(
        "Market",
        reqwest::Client::new(),
        policy,
        RateLimitClient::create_rate_limiter(1000.0, 100).unwrap(),
    );
    MarketApiClient::with_http(&server.uri(), http, Duration::from_secs(5))
}

fn listing_json(id: i64, name: &str, seen_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "server": {"id": 1, "name": "Marmara"},
        "item": {"id": 10, "name": name, "category": null, "image_url": null},
        "seller_name": "Ahmet",
        "quantity": 1,
        "price_won": 2,
        "price_yang": 500,
        "total_price_yang": 200000500,
        "seen_at": seen_at,
        "bonuses": [{"bonus_name": "Max HP +2000", "bonus_value": ""}]
    })
}

#[tokio::test]
async fn test_listings_forward_filters_and_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/listings"))
        .and(query_param("item_name", "Kılıç"))
        .and(query_param("server", "Marmara"))
        .and(query_param("sort_by", "newest"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            listing_json(1, "Kılıç +9", "2025-01-02T10:00:00"),
            listing_json(2, "Kılıç +7", "2025-01-01T09:30:00.250000")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let listings = client
        .listings(&ListingQuery::filtered(Some("Kılıç"), Some("Marmara")))
        .await
        .unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].item.name, "Kılıç +9");
    assert_eq!(listings[0].total_price_yang, 200_000_500);
    assert_eq!(listings[1].bonuses[0].bonus_name, "Max HP +2000");
}

#[tokio::test]
async fn test_top_items_and_price_history_are_ordered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/stats/top-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "İksir", "count": 2},
            {"name": "Kılıç +9", "count": 7}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/market/stats/price-history"))
        .and(query_param("item_name", "Kılıç +9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2025-01-03", "avg_price": 300.5},
            {"date": "2025-01-01", "avg_price": 100.0}
        ])))
        .mount(&server)
        .await;

    let client = fast_client(&server);

    let top = client.top_items().await.unwrap();
    assert_eq!(top[0].name, "Kılıç +9");
    assert_eq!(top[1].count, 2);

    let history = client.price_history("Kılıç +9").await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].date < history[1].date);
    assert_eq!(history[1].avg_price, 300.5);
}

#[tokio::test]
async fn test_servers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/servers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Marmara"}])),
        )
        .mount(&server)
        .await;

    let servers = fast_client(&server).servers().await.unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].name, "Marmara");
}

#[tokio::test]
async fn test_reads_retry_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/servers"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/market/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let servers = fast_client(&server).servers().await.unwrap();
    assert!(servers.is_empty());
}

#[tokio::test]
async fn test_reads_give_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/stats/top-items"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = fast_client(&server).top_items().await.unwrap_err();
    assert!(matches!(err, AppError::ExternalServiceError(_)));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/stats/price-history"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(&server).price_history("İksir").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_scrape_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(body_json(json!({"query": "Kılıç", "server": "Marmara"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Scraped successfully for 'Kılıç'",
            "output": "Saved 14 listings"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fast_client(&server)
        .trigger_scrape("Kılıç", "Marmara")
        .await
        .unwrap();
    assert_eq!(outcome.output.as_deref(), Some("Saved 14 listings"));
}

#[tokio::test]
async fn test_scrape_failure_carries_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Scraper failed",
            "error": "TimeoutException: page did not load"
        })))
        .mount(&server)
        .await;

    match fast_client(&server).trigger_scrape("Kılıç", "Marmara").await {
        Err(AppError::ScrapeFailed {
            message,
            diagnostics,
        }) => {
            assert_eq!(message, "Scraper failed");
            assert_eq!(
                diagnostics.as_deref(),
                Some("TimeoutException: page did not load")
            );
        }
        other => panic!("expected ScrapeFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scrape_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(&server)
        .trigger_scrape("Kılıç", "Marmara")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ScrapeFailed { .. }));
}

#[tokio::test]
async fn test_scrape_rejects_blank_query_without_calling_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = fast_client(&server)
        .trigger_scrape("   ", "Marmara")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}
