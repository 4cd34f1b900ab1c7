//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use steady_core::{CategoryMap, InMemoryStore, Transaction};

fn tx(days_ago: i64, amount: f64, category: &str) -> Transaction {
    Transaction {
        id: format!("t{}:{}", days_ago, amount),
        user_id: "u1".to_string(),
        posted_at: Utc::now() - Duration::days(days_ago),
        amount,
        category: category.to_string(),
        merchant: None,
    }
}

fn seeded_store() -> InMemoryStore {
    let mut txs = Vec::new();
    for week in 0..12 {
        txs.push(tx(week * 7 + 1, 650.0, "gig payout"));
    }
    for day in (0..80).step_by(2) {
        txs.push(tx(day, -40.0, "groceries"));
    }
    InMemoryStore::new(txs, 1_500.0)
}

fn setup_test_app(store: InMemoryStore) -> Router {
    let store = Arc::new(store);
    let planner = BudgetPlanner::new(store.clone(), store, CategoryMap::default());
    create_router(planner, ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app(InMemoryStore::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_compute_budget() {
    let app = setup_test_app(seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/u1/budget/{}", current_month()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;

    let plan = &json["budget_plan"];
    assert_eq!(plan["user_id"], "u1");
    assert!(plan["total_income_expected"].as_f64().unwrap() > 0.0);
    let confidence = plan["confidence_score"].as_f64().unwrap();
    assert!(confidence > 0.0 && confidence <= 1.0);
    assert!(plan["categories"].as_array().unwrap().len() >= 4);
    assert!(json["alerts"].is_array());
}

#[tokio::test]
async fn test_invalid_month_is_400() {
    let app = setup_test_app(seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/u1/budget/2026-13")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("month"));
}

#[tokio::test]
async fn test_invalid_mode_is_400() {
    let app = setup_test_app(seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/u1/budget/{}?mode=panic", current_month()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mode_override_respected() {
    let app = setup_test_app(seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/users/u1/budget/{}?mode=growth",
                    current_month()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["budget_plan"]["mode"], "growth");
}

#[tokio::test]
async fn test_empty_history_degrades_to_advisory_plan() {
    let app = setup_test_app(InMemoryStore::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/u1/budget/{}", current_month()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Degraded, not an error
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["budget_plan"]["total_planned"], 0.0);
    assert_eq!(json["alerts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_budget_series() {
    let app = setup_test_app(seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/u1/budget/{}/series", current_month()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let daily = json["daily_spend"].as_array().unwrap();
    assert!(daily.len() >= 28 && daily.len() <= 31);
    assert!(!json["buffer_history"].as_array().unwrap().is_empty());
}
