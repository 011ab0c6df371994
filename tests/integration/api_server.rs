//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, caching and the pipeline
//! trigger.


use serde_json::{json, Value};

use test_utils::{aapl_analysis, FailingRead, FakeOutcome, TestApiServer, SECRET};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "signalscope-api");
    assert_eq!(body["store"], true);
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for metric in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "view_cache_hits_total",
        "pipeline_runs_total",
    ] {
        assert!(body.contains(metric), "Expected {} metric", metric);
    }
}

#[tokio::test]
async fn analysis_endpoint_returns_view() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analysis/aapl").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["header"]["symbol"], "AAPL");
    assert_eq!(body["moving_averages"]["position"], "ABOVE_ALL");
    assert_eq!(body["macd"]["bullish"], true);
    assert_eq!(body["rsi"]["zone"], "NEUTRAL");
    assert_eq!(body["stochastic"]["zone"], "OVERBOUGHT");
    assert_eq!(body["chart"]["variant"], "radar");
    assert_eq!(body["signals"].as_array().unwrap().len(), 4);
    assert!(body["ai_output"].is_null());
}

#[tokio::test]
async fn unknown_symbol_is_not_found() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analysis/TSLA").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn invalid_symbol_is_bad_request() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analysis/BRK.B").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_symbol");
}

#[tokio::test]
async fn malformed_signals_fail_the_lookup() {
    let server = TestApiServer::with_failing_store(FailingRead::Signals).await;
    let response = server.get("/api/analysis/AAPL").await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body["error"], "malformed_record");
    assert_ne!(body["error"], "not_found");
}

#[tokio::test]
async fn malformed_ai_output_fails_the_lookup() {
    let server = TestApiServer::with_failing_store(FailingRead::AiOutput).await;

    for path in ["/api/analysis/AAPL", "/api/analysis/AAPL/chart"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 500, "{}", path);
        let body: Value = response.json();
        assert_eq!(body["error"], "malformed_record");
    }
}

#[tokio::test]
async fn malformed_record_is_not_cached() {
    let server = TestApiServer::with_failing_store(FailingRead::Signals).await;
    let _ = server.get("/api/analysis/AAPL").await;

    assert_eq!(server.get("/api/analysis/AAPL").await.status_code(), 500);
}

#[tokio::test]
async fn chart_endpoint_honours_variant_override() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .get("/api/analysis/AAPL/chart")
        .add_query_param("variant", "gauge")
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["variant"], "gauge");
    assert_eq!(body["chart"]["variant"], "gauge");
    assert_eq!(body["chart"]["data"]["signal_count"], 4);

    let response = app.server.get("/api/analysis/AAPL/chart").await;
    let body: Value = response.json();
    assert_eq!(body["variant"], "radar");
}

#[tokio::test]
async fn chart_endpoint_rejects_unknown_variant() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/analysis/AAPL/chart")
        .add_query_param("variant", "treemap")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn dashboard_lists_analyses_and_symbols() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/dashboard").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbols"], json!(["AAPL"]));
    assert_eq!(body["analyses"][0]["current_price"], 187.5);
    assert_eq!(body["bullish_signals"].as_array().unwrap().len(), 2);

    let symbols: Vec<String> = app.server.get("/api/symbols").await.json();
    assert_eq!(symbols, vec!["AAPL".to_string()]);
}

#[tokio::test]
async fn views_are_cached_until_revalidated() {
    let app = TestApiServer::new().await;

    let first: Value = app.server.get("/api/analysis/AAPL").await.json();
    assert_eq!(first["header"]["timestamp"], "2024-03-04T16:00:00Z");

    app.store.insert_analysis(aapl_analysis("a-2", 5, 190.0)).await;
    let cached: Value = app.server.get("/api/analysis/AAPL").await.json();
    assert_eq!(cached, first);
    assert_eq!(app.metrics.view_cache_hits_total.get(), 1);

    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": SECRET, "tag": "analysis:AAPL" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["revalidated"], true);

    let fresh: Value = app.server.get("/api/analysis/AAPL").await.json();
    assert_eq!(fresh["header"]["timestamp"], "2024-03-05T16:00:00Z");
}

#[tokio::test]
async fn revalidate_by_dashboard_path() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/dashboard").await;

    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": SECRET, "path": "/" }))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn revalidate_rejects_wrong_secret() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": "guess", "tag": "dashboard" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn revalidate_rejects_secret_differing_in_last_character() {
    let app = TestApiServer::new().await;
    let mut near_miss = SECRET[..SECRET.len() - 1].to_string();
    near_miss.push('X');

    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": near_miss, "tag": "dashboard" }))
        .await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": SECRET, "tag": "dashboard" }))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn revalidate_requires_a_target() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": SECRET }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .post("/api/revalidate")
        .json(&json!({ "secret": SECRET, "tag": "symbols" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn pipeline_runs_validated_batch() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": [" aapl", "MSFT", "AAPL"], "with_ai": true }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["symbols"], json!(["AAPL", "MSFT"]));

    let runs = app.pipeline.runs.lock().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0], (vec!["AAPL".to_string(), "MSFT".to_string()], true));
}

#[tokio::test]
async fn pipeline_accepts_comma_separated_symbols() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": "nvda, aapl,,NVDA" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbols"], json!(["NVDA", "AAPL"]));
    assert_eq!(body["with_ai"], false);

    let runs = app.pipeline.runs.lock().await;
    assert_eq!(runs[0].0, vec!["NVDA".to_string(), "AAPL".to_string()]);
}

#[tokio::test]
async fn pipeline_rejects_invalid_comma_separated_symbols() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": "AAPL, 123" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["rejected"], json!(["123"]));
    assert!(app.pipeline.runs.lock().await.is_empty());
}

#[tokio::test]
async fn pipeline_run_invalidates_cached_views() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/analysis/AAPL").await;
    app.store.insert_analysis(aapl_analysis("a-2", 5, 190.0)).await;

    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": ["AAPL"] }))
        .await;
    assert_eq!(response.status_code(), 200);

    let fresh: Value = app.server.get("/api/analysis/AAPL").await.json();
    assert_eq!(fresh["header"]["timestamp"], "2024-03-05T16:00:00Z");
}

#[tokio::test]
async fn pipeline_rejects_invalid_batch() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": ["AAPL", "BRK.B", "TOOLONG"] }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_batch");
    assert_eq!(body["rejected"], json!(["BRK.B", "TOOLONG"]));
    assert!(app.pipeline.runs.lock().await.is_empty());
}

#[tokio::test]
async fn pipeline_rejects_oversized_batch() {
    let app = TestApiServer::new().await;
    let symbols: Vec<String> = ('A'..='K').map(|c| c.to_string()).collect();
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": symbols }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn pipeline_failure_is_server_error() {
    let app = TestApiServer::with_outcome(FakeOutcome::Fail).await;
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": ["AAPL"] }))
        .await;
    assert_eq!(response.status_code(), 500);
    assert_eq!(app.metrics.pipeline_failures_total.get(), 1);
}

#[tokio::test]
async fn pipeline_timeout_is_gateway_timeout() {
    let app = TestApiServer::with_outcome(FakeOutcome::TimeOut).await;
    let response = app
        .server
        .post("/api/pipeline")
        .json(&json!({ "symbols": ["AAPL"] }))
        .await;
    assert_eq!(response.status_code(), 504);

    let body: Value = response.json();
    assert_eq!(body["error"], "pipeline_timeout");
}

#[tokio::test]
async fn unconfigured_server_answers_service_unavailable() {
    let server = TestApiServer::unconfigured();

    assert_eq!(server.get("/health").await.status_code(), 200);
    assert_eq!(server.get("/api/dashboard").await.status_code(), 503);
    assert_eq!(server.get("/api/analysis/AAPL").await.status_code(), 503);

    let response = server
        .post("/api/pipeline")
        .json(&json!({ "symbols": ["AAPL"] }))
        .await;
    assert_eq!(response.status_code(), 503);

    let response = server
        .post("/api/revalidate")
        .json(&json!({ "secret": SECRET, "tag": "dashboard" }))
        .await;
    assert_eq!(response.status_code(), 401);
}
