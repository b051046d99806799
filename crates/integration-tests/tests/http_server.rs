//! End-to-end over a real socket: the service bound to an ephemeral port,
//! exercised with a plain HTTP client.

use integration_tests::web::jwt::{app, bearer};

/// Binds the app to 127.0.0.1:0 and returns the base URL.
async fn serve() -> String {
    let (app, _, _) = app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_create_and_read_over_the_wire() {
    let base = serve().await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{base}/healthz")).send().await.unwrap();
    assert_eq!(health.status(), 200);
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let auth = bearer(&integration_tests::principal("Dana"));
    let created: serde_json::Value = client
        .post(format!("{base}/api/news"))
        .header("authorization", &auth)
        .json(&serde_json::json!({
            "title": "Over The Wire",
            "description": "d",
            "content": "c",
            "image": "i",
            "category": "Technology"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let slug = created["data"]["slug"].as_str().unwrap();

    let fetched: serde_json::Value = client
        .get(format!("{base}/api/news/{slug}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["data"]["title"], "Over The Wire");
    assert_eq!(fetched["data"]["views"], 1);
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let base = serve().await;
    let response = reqwest::Client::new()
        .get(format!("{base}/healthz"))
        .send()
        .await
        .unwrap();
    let id = response.headers().get("x-request-id").expect("x-request-id header");
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn cors_preflight_is_wide_open() {
    let base = serve().await;
    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/api/news"))
        .header("origin", "https://newsroom-frontend.example")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn the_metrics_endpoint_reports_served_requests() {
    let base = serve().await;
    let client = reqwest::Client::new();

    // Generate a sample before scraping.
    client.get(format!("{base}/healthz")).send().await.unwrap();

    let scrape = client.get(format!("{base}/metrics")).send().await.unwrap();
    assert_eq!(scrape.status(), 200);
    let text = scrape.text().await.unwrap();
    assert!(text.contains("newsroom_http_requests_total"), "scrape was: {text}");
    assert!(text.contains("route=\"/healthz\""));
}
