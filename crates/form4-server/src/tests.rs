//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use form4_core::test_utils::Fixture;
use form4_core::Database;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    Fixture::new(&db).seed_scenario();
    db
}

fn setup_test_app() -> Router {
    create_router(setup_test_db(), None, ServerConfig::default())
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ========== Health Tests ==========

#[tokio::test]
async fn test_health() {
    let response = get(setup_test_app(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["transactions"], 3);
    assert_eq!(json["summaries"], 2);
}

#[tokio::test]
async fn test_security_headers() {
    let response = get(setup_test_app(), "/api/health").await;
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let config = ServerConfig {
        allowed_origins: vec!["https://dash.example.com".to_string()],
    };
    let app = create_router(setup_test_db(), None, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "https://dash.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://dash.example.com"
    );
}

#[tokio::test]
async fn test_cors_default_sends_no_allow_origin() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!response
        .headers()
        .contains_key("access-control-allow-origin"));
}

// ========== Companies Tests ==========

#[tokio::test]
async fn test_list_companies() {
    let response = get(setup_test_app(), "/api/companies").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json, serde_json::json!(["All", "Acme", "Globex"]));
}

// ========== Transactions Tests ==========

#[tokio::test]
async fn test_list_transactions_all() {
    let response = get(setup_test_app(), "/api/transactions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    // Newest first
    assert_eq!(rows[2]["insider_name"], "Jane Doe");
}

#[tokio::test]
async fn test_list_transactions_by_company() {
    let response = get(setup_test_app(), "/api/transactions?company=Acme&window=all").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["company_name"] == "Acme"));
}

#[tokio::test]
async fn test_list_transactions_all_sentinel_case_insensitive() {
    let response = get(setup_test_app(), "/api/transactions?company=all").await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_transactions_recent_window_excludes_old_rows() {
    // Seeded trades are from 2025; a fresh trade from today must be the only 7-day match
    let db = setup_test_db();
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    Fixture::new(&db).trade(&today, "Bo Kim", "Initech", "P", 10.0, 5.0);
    let app = create_router(db, None, ServerConfig::default());

    let response = get(app, "/api/transactions?window=7d").await;
    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["company_name"], "Initech");
}

#[tokio::test]
async fn test_list_transactions_invalid_window() {
    let response = get(setup_test_app(), "/api/transactions?window=fortnight").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Unknown time window"));
}

// ========== Chart Tests ==========

#[tokio::test]
async fn test_get_chart() {
    let response = get(setup_test_app(), "/api/chart").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!([
            {"company_name": "Acme", "total_shares": 150.0},
            {"company_name": "Globex", "total_shares": 30.0}
        ])
    );
}

#[tokio::test]
async fn test_get_chart_null_shares_is_unprocessable() {
    let db = setup_test_db();
    Fixture::new(&db).raw_trade("2025-07-01", "Bo Kim", "Initech", Some("P"), None, None, None);
    let app = create_router(db, None, ServerConfig::default());

    let response = get(app, "/api/chart").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Initech"));
}

#[tokio::test]
async fn test_database_failure_is_generic() {
    let db = Database::in_memory().unwrap();
    db.conn()
        .unwrap()
        .execute_batch("DROP TABLE ai_summaries;")
        .unwrap();
    let app = create_router(db, None, ServerConfig::default());

    let response = get(app, "/api/summaries").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
}

// ========== Summaries Tests ==========

#[tokio::test]
async fn test_list_summaries() {
    let response = get(setup_test_app(), "/api/summaries?company=Acme").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["summary_text"], "We recommend a buy");
    assert_eq!(rows[0]["sentiment"], "positive");
    assert_eq!(rows[1]["sentiment"], "negative");
}

#[tokio::test]
async fn test_list_summaries_other_company_empty() {
    let response = get(setup_test_app(), "/api/summaries?company=Globex").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

// ========== Dashboard Tests ==========

#[tokio::test]
async fn test_get_dashboard() {
    let response = get(setup_test_app(), "/api/dashboard?company=Acme&window=all-time").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["criteria"]["company"], "Acme");
    assert_eq!(json["criteria"]["time_window"], "all-time");
    assert_eq!(json["companies"].as_array().unwrap().len(), 3);
    assert_eq!(json["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["aggregates"],
        serde_json::json!([{"company_name": "Acme", "total_shares": 150.0}])
    );
    assert_eq!(json["summaries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_window_echo_is_accepted_back() {
    let response = get(setup_test_app(), "/api/dashboard?window=7d").await;
    let json = get_body_json(response).await;
    let window = json["criteria"]["time_window"].as_str().unwrap().to_string();
    assert_eq!(window, "last-7-days");

    let response = get(
        setup_test_app(),
        &format!("/api/transactions?window={}", window),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_dashboard_empty_database() {
    let app = create_router(Database::in_memory().unwrap(), None, ServerConfig::default());
    let response = get(app, "/api/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["companies"], serde_json::json!(["All"]));
    assert!(json["transactions"].as_array().unwrap().is_empty());
    assert!(json["aggregates"].as_array().unwrap().is_empty());
}

// ========== Export Tests ==========

#[tokio::test]
async fn test_export_csv() {
    let response = get(setup_test_app(), "/api/export/transactions?company=Globex").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"insider_transactions.csv\""
    );
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );

    let body = get_body_text(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "transaction_date,insider_name,company_name,transaction_code,shares,price_per_share,total_value"
    );
    assert_eq!(lines[1], "2025-06-01 00:00:00,Ann Lee,Globex,S,30.0,40.0,1200.0");
}

#[tokio::test]
async fn test_export_json() {
    let response = get(setup_test_app(), "/api/export/transactions?format=json").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");

    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_export_invalid_format() {
    let response = get(setup_test_app(), "/api/export/transactions?format=xml").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
