use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::RecommendationConfig;
use crate::wardrobe::domain::ColorFamily;
use crate::wardrobe::router::{self, wardrobe_router};
use crate::wardrobe::service::{OutfitRequest, WardrobeService};

fn json_request(method: &str, uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request")
}

fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request")
}

#[tokio::test]
async fn ingest_route_returns_stored_garments() {
    let (service, store) = build_service();
    let router = wardrobe_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/garments",
            json!({ "garments": starter_submissions() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let results = payload["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["garment"]["id"], json!("garment-000001"));
    assert_eq!(results[0]["garment"]["primary_category"], json!("Top"));
    assert_eq!(results[0]["validation_report"]["status"], json!("PASS"));
    assert!(payload.get("errors").is_none());
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn derive_route_previews_without_storing() {
    let (service, store) = build_service();
    let router = wardrobe_router(Arc::new(service));
    let body = serde_json::to_value(submission(puffer_signals(), [15, 15, 15]))
        .expect("serialize submission");

    let response = router
        .oneshot(json_request("POST", "/api/v1/garments/derive", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["profile"]["primary_category"], json!("Outerwear"));
    assert_eq!(payload["profile"]["rain_safe"], json!("true"));
    assert!(payload["validation_report"]["continuous_scores"].is_object());
    assert!(payload["confidence_adjustment"].is_number());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn derive_path_is_never_read_as_a_garment_id() {
    let (service, store) = build_service();
    let batch = service.ingest(starter_submissions());
    assert_eq!(batch.results.len(), 3);
    let router = wardrobe_router(Arc::new(service));

    let response = router
        .oneshot(empty_request("GET", "/api/v1/garments/derive"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn recommend_route_explains_missing_outerwear() {
    let store = Arc::new(MemoryStore::seeded(vec![
        top(80.0, ColorFamily::Neutral),
        bottom(75.0, ColorFamily::Neutral),
    ]));
    let service = WardrobeService::new(store, RecommendationConfig::default());
    let router = wardrobe_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/outfits/recommend",
            json!({ "temperature": 2, "weather": "snowy", "event_formality": "casual" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("No suitable outerwear for 2°C. This is too cold without a jacket!")
    );
    assert_eq!(
        payload["suggestion"],
        json!("Please add jackets or coats to your wardrobe.")
    );
}

#[tokio::test]
async fn recommend_handler_returns_outfit_and_safety_checks() {
    let (service, _store) = build_service();
    service.ingest(starter_submissions());
    let request = OutfitRequest::new(25.0, "sunny", Default::default());

    let response = router::recommend_handler::<MemoryStore>(
        State(Arc::new(service)),
        axum::Json(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outfit"]["top"]["id"], json!("garment-000001"));
    assert_eq!(payload["outfit"]["bottom"]["id"], json!("garment-000002"));
    assert!(payload["outfit"]["outerwear"].is_null());
    assert_eq!(payload["event"], json!("casual"));
    assert_eq!(payload["safety_checks"]["color_rules_passed"], json!(true));
    assert_eq!(payload["weather"]["condition"], json!("sunny"));
}

#[tokio::test]
async fn alternatives_handler_wraps_the_list() {
    let (service, _store) = build_service();
    service.ingest(starter_submissions());
    let request = OutfitRequest::new(20.0, "sunny", Default::default()).with_count(1);

    let response = router::alternatives_handler::<MemoryStore>(
        State(Arc::new(service)),
        axum::Json(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let alternatives = payload["alternatives"].as_array().expect("alternatives array");
    assert_eq!(alternatives.len(), 1);
    assert!(alternatives[0]["score"].as_f64().unwrap_or_default() >= 30.0);
}

#[tokio::test]
async fn garment_handler_returns_not_found() {
    let (service, _store) = build_service();

    let response = router::garment_handler::<MemoryStore>(
        State(Arc::new(service)),
        Path("garment-000404".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": "Garment not found" }));
}

#[tokio::test]
async fn delete_then_fetch_round_trip() {
    let (service, _store) = build_service();
    service.ingest(starter_submissions());
    let router = wardrobe_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", "/api/v1/garments/garment-000002"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(
        payload["message"],
        json!("Garment garment-000002 deleted successfully")
    );

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/garments/garment-000002/validation"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/garments"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["summary"]["total"], json!(2));
    assert_eq!(payload["garments"][0]["id"], json!("garment-000003"));
}

#[tokio::test]
async fn validation_route_reports_review_state() {
    let (service, _store) = build_service();
    service.ingest(starter_submissions());
    let router = wardrobe_router(Arc::new(service));

    let response = router
        .oneshot(empty_request("GET", "/api/v1/garments/garment-000001/validation"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("PASS"));
    assert_eq!(payload["primary_category"], json!("Top"));
    assert_eq!(payload["continuous_scores"]["insulation"], json!(12.0));
}

#[tokio::test]
async fn stats_route_is_not_found_for_an_empty_wardrobe() {
    let (service, _store) = build_service();
    let router = wardrobe_router(Arc::new(service));

    let response = router
        .oneshot(empty_request("GET", "/api/v1/wardrobe/stats"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("No garments in wardrobe"));
}

#[tokio::test]
async fn stats_handler_counts_the_wardrobe() {
    let (service, _store) = build_service();
    service.ingest(starter_submissions());

    let response = router::stats_handler::<MemoryStore>(State(Arc::new(service))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_items"], json!(3));
    assert_eq!(payload["by_category"]["Outerwear"], json!(1));
}

#[tokio::test]
async fn list_handler_returns_internal_error_on_store_failure() {
    let service = Arc::new(WardrobeService::new(
        Arc::new(UnavailableStore),
        RecommendationConfig::default(),
    ));

    let response = router::list_handler::<UnavailableStore>(State(service)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("garment store unavailable: database offline")
    );
}
